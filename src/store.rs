use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
    SqlErr, TransactionTrait,
};
use tracing::{debug, info};

use crate::{entities::movie, seed::seed_movies, validation::MovieInput};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("movie {id} not found")]
    NotFound { id: i32 },

    #[error("a movie titled {0:?} already exists")]
    DuplicateTitle(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for the `movie` table.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_ordered_by_rank(&self) -> StoreResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_asc(movie::Column::Ranking)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> StoreResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    pub async fn insert(&self, input: &MovieInput) -> StoreResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(input.title.clone()),
            year: Set(input.year),
            description: Set(input.description.clone()),
            rating: Set(input.rating),
            ranking: Set(input.ranking),
            review: Set(input.review.clone()),
            img_url: Set(input.img_url.clone()),
        };

        let created = model.insert(&self.db).await.map_err(|e| classify(e, &input.title))?;
        info!(movie_id = created.id, title = %created.title, "movie added");
        Ok(created)
    }

    /// Overwrites every editable field of an existing movie.
    pub async fn update(&self, id: i32, input: &MovieInput) -> StoreResult<movie::Model> {
        let mut model: movie::ActiveModel = self.get(id).await?.into();
        model.title = Set(input.title.clone());
        model.year = Set(input.year);
        model.description = Set(input.description.clone());
        model.rating = Set(input.rating);
        model.ranking = Set(input.ranking);
        model.review = Set(input.review.clone());
        model.img_url = Set(input.img_url.clone());

        let updated = model.update(&self.db).await.map_err(|e| classify(e, &input.title))?;
        info!(movie_id = id, title = %updated.title, "movie updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        info!(movie_id = id, "movie deleted");
        Ok(())
    }

    pub async fn count(&self) -> StoreResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    /// Inserts the starter collection when the table holds no rows.
    ///
    /// Returns how many movies were inserted.
    pub async fn seed_if_empty(&self) -> StoreResult<usize> {
        let txn = self.db.begin().await?;

        let existing = movie::Entity::find().count(&txn).await?;
        if existing > 0 {
            debug!(existing, "movie table already populated, skipping seed");
            return Ok(0);
        }

        let seeds = seed_movies();
        let inserted = seeds.len();
        let models = seeds.into_iter().map(|m| movie::ActiveModel {
            id: Default::default(),
            title: Set(m.title),
            year: Set(m.year),
            description: Set(m.description),
            rating: Set(m.rating),
            ranking: Set(m.ranking),
            review: Set(m.review),
            img_url: Set(m.img_url),
        });
        movie::Entity::insert_many(models).exec(&txn).await?;

        txn.commit().await?;

        info!(inserted, "seeded movie table");
        Ok(inserted)
    }
}

fn classify(err: DbErr, title: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateTitle(title.to_string()),
        _ => StoreError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn store() -> MovieStore {
        let db = db::connect_and_migrate("sqlite::memory:").await.expect("db");
        MovieStore::new(db)
    }

    fn sample(title: &str, ranking: i32) -> MovieInput {
        MovieInput {
            title: title.to_string(),
            year: 1999,
            description: "A hacker learns the truth about his reality.".to_string(),
            rating: 8.7,
            ranking,
            review: "Still holds up.".to_string(),
            img_url: "/static/img/matrix.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn seed_inserts_five_movies_once() {
        let store = store().await;
        assert_eq!(store.seed_if_empty().await.expect("seed"), 5);
        assert_eq!(store.seed_if_empty().await.expect("reseed"), 0);
        assert_eq!(store.count().await.expect("count"), 5);
    }

    #[tokio::test]
    async fn seed_skips_non_empty_table() {
        let store = store().await;
        store.insert(&sample("The Matrix", 1)).await.expect("insert");
        assert_eq!(store.seed_if_empty().await.expect("seed"), 0);
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn lists_seeded_movies_by_ranking() {
        let store = store().await;
        store.seed_if_empty().await.expect("seed");
        let titles: Vec<_> = store
            .list_ordered_by_rank()
            .await
            .expect("list")
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(
            titles,
            [
                "The Dark Knight",
                "The Shawshank Redemption",
                "Interstellar",
                "The Godfather",
                "Inception",
            ]
        );
    }

    #[tokio::test]
    async fn get_missing_movie_is_not_found() {
        let store = store().await;
        let err = store.get(999).await.expect_err("missing");
        assert!(matches!(err, StoreError::NotFound { id: 999 }));
    }

    #[tokio::test]
    async fn insert_assigns_id_and_round_trips() {
        let store = store().await;
        let created = store.insert(&sample("The Matrix", 7)).await.expect("insert");
        let fetched = store.get(created.id).await.expect("get");
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "The Matrix");
        assert_eq!(fetched.ranking, 7);
    }

    #[tokio::test]
    async fn duplicate_title_is_reported() {
        let store = store().await;
        store.insert(&sample("The Matrix", 1)).await.expect("insert");
        let err = store.insert(&sample("The Matrix", 2)).await.expect_err("duplicate");
        assert!(matches!(err, StoreError::DuplicateTitle(ref t) if t == "The Matrix"));
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let store = store().await;
        let created = store.insert(&sample("The Matrix", 1)).await.expect("insert");

        let mut changed = sample("The Matrix Reloaded", 9);
        changed.rating = 7.2;
        changed.year = 2003;
        let updated = store.update(created.id, &changed).await.expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "The Matrix Reloaded");
        assert_eq!(updated.year, 2003);
        assert_eq!(updated.rating, 7.2);
        assert_eq!(store.get(created.id).await.expect("get"), updated);
    }

    #[tokio::test]
    async fn update_to_existing_title_is_rejected() {
        let store = store().await;
        store.insert(&sample("The Matrix", 1)).await.expect("insert");
        let other = store.insert(&sample("Heat", 2)).await.expect("insert");

        let err = store.update(other.id, &sample("The Matrix", 2)).await.expect_err("dup");
        assert!(matches!(err, StoreError::DuplicateTitle(_)));
        assert_eq!(store.get(other.id).await.expect("get").title, "Heat");
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = store().await;
        let created = store.insert(&sample("The Matrix", 1)).await.expect("insert");
        store.delete(created.id).await.expect("delete");
        assert!(matches!(store.get(created.id).await, Err(StoreError::NotFound { .. })));
        assert!(matches!(store.delete(created.id).await, Err(StoreError::NotFound { .. })));
    }
}
