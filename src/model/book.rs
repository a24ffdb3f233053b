use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub title: String,

    pub published: i32,

    /// Id of the referenced author document.
    pub author: ObjectId,

    #[serde(default)]
    pub genres: Vec<String>,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        published: i32,
        author: ObjectId,
        genres: Vec<String>,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            title: title.into(),
            published,
            author,
            genres,
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}
