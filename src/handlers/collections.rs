use crate::error::AppError;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;

/// Drain a collection in stored order. Listings are unfiltered and
/// unpaginated; documents go back to the client verbatim.
async fn collect_all(collection: Collection<Document>) -> Result<Vec<Document>, AppError> {
    let mut cursor = collection.find(doc! {}, None).await.map_err(AppError::from)?;

    let mut documents = Vec::new();
    while let Some(document) = cursor.try_next().await.map_err(AppError::from)? {
        documents.push(document);
    }

    Ok(documents)
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(collect_all(state.db.projects()).await?))
}

pub async fn list_experience(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(collect_all(state.db.experience()).await?))
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(collect_all(state.db.blogs()).await?))
}

/// Fetches all blogs and filters in the handler, returning an array of 0 or 1
/// documents.
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = collect_all(state.db.blogs()).await?;

    Ok(Json(
        documents
            .into_iter()
            .filter(|document| matches_id(document, &id))
            .collect(),
    ))
}

/// A document matches when its `_id`, or a top-level `id` field, renders to
/// the requested path segment. Documents are schema-less, so ids may be
/// ObjectIds, strings, or integers.
fn matches_id(document: &Document, id: &str) -> bool {
    document
        .get("_id")
        .map_or(false, |value| bson_matches(value, id))
        || document
            .get("id")
            .map_or(false, |value| bson_matches(value, id))
}

fn bson_matches(value: &Bson, id: &str) -> bool {
    match value {
        Bson::ObjectId(oid) => oid.to_hex() == id,
        Bson::String(s) => s == id,
        Bson::Int32(n) => n.to_string() == id,
        Bson::Int64(n) => n.to_string() == id,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn matches_object_id_by_hex() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "title": "first post" };

        assert!(matches_id(&document, &oid.to_hex()));
        assert!(!matches_id(&document, "ffffffffffffffffffffffff"));
    }

    #[test]
    fn matches_string_and_integer_ids() {
        let by_string = doc! { "_id": "post-1" };
        assert!(matches_id(&by_string, "post-1"));
        assert!(!matches_id(&by_string, "post-2"));

        let by_int = doc! { "_id": ObjectId::new(), "id": 42 };
        assert!(matches_id(&by_int, "42"));
        assert!(!matches_id(&by_int, "43"));
    }

    #[test]
    fn no_id_field_never_matches() {
        let document = doc! { "title": "untitled" };
        assert!(!matches_id(&document, "untitled"));
    }
}
