use crate::models::Post;
use crate::{Error, Result};
use rusqlite::{params, Connection, Row};

const POST_COLUMNS: &str =
    "id, title, content, image, thumbnail, status, category, published_at, updated_at, user_id";

pub struct PostRepository;

impl PostRepository {
    /// Replace the cached feed with `posts`, keeping their order.
    ///
    /// The previous contents are dropped; nothing is merged.
    pub fn replace_all(conn: &mut Connection, posts: &[Post]) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM posts", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO posts (id, position, title, content, image, thumbnail, status, category, published_at, updated_at, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;

            for (position, post) in posts.iter().enumerate() {
                stmt.execute(params![
                    post.id,
                    position as i64,
                    post.title,
                    post.content,
                    post.image,
                    post.thumbnail,
                    post.status,
                    post.category,
                    post.published_at,
                    post.updated_at,
                    post.user_id,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Get all cached posts in feed order
    pub fn get_all(conn: &Connection) -> Result<Vec<Post>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts ORDER BY position",
            POST_COLUMNS
        ))?;

        let posts = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    /// Get a cached post by ID
    pub fn get_by_id(conn: &Connection, id: &str) -> Result<Post> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS))?;

        stmt.query_row(params![id], Self::from_row).map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound(format!("Post not found: {}", id)),
            other => other.into(),
        })
    }

    /// Count cached posts
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        Ok(Post {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            image: row.get(3)?,
            thumbnail: row.get(4)?,
            status: row.get(5)?,
            category: row.get(6)?,
            published_at: row.get(7)?,
            updated_at: row.get(8)?,
            user_id: row.get(9)?,
        })
    }
}
