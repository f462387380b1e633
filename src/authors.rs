//! Author list derivation and profile lookup

use crate::api::{ApiError, PostsApi};
use crate::models::{Author, Post};

/// Derive the unique author list from a set of posts
///
/// Deduplicates by author id (first occurrence wins) and sorts ascending by
/// display name, compared case-insensitively. Pure and deterministic; the
/// sort is stable, so authors with equal display names keep their post order.
pub fn derive_authors(posts: &[Post]) -> Vec<Author> {
    let mut authors: Vec<Author> = Vec::new();

    for post in posts {
        if !authors.iter().any(|a| a.id == post.author.id) {
            authors.push(post.author.clone());
        }
    }

    authors.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });

    authors
}

/// Fetch an author profile, falling back to an embedded author on failure
///
/// When the dedicated profile fetch fails and one of the already-loaded
/// posts carries the requested author, that embedded record stands in for
/// the profile. Only if no such post exists does the fetch error surface.
pub async fn lookup_author<A: PostsApi>(
    api: &A,
    id: &str,
    loaded: &[Post],
) -> Result<Author, ApiError> {
    match api.user(id).await {
        Ok(author) => Ok(author),
        Err(e) => loaded
            .iter()
            .find(|p| p.author.id == id)
            .map(|p| p.author.clone())
            .ok_or(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use crate::models::PostKind;
    use chrono::Utc;

    fn post_by(post_id: &str, author_id: &str, display_name: &str) -> Post {
        let now = Utc::now();
        Post {
            id: post_id.to_string(),
            title: format!("Post {post_id}"),
            content: String::new(),
            kind: PostKind::Article,
            created_at: now,
            updated_at: now,
            author: Author {
                id: author_id.to_string(),
                username: display_name.to_lowercase().replace(' ', "-"),
                email: format!("{author_id}@example.com"),
                display_name: display_name.to_string(),
                avatar_url: None,
                created_at: now,
            },
        }
    }

    #[test]
    fn test_derive_authors_dedupes_by_id() {
        let posts = vec![
            post_by("p1", "a1", "Ada"),
            post_by("p2", "a1", "Ada"),
            post_by("p3", "a2", "Grace"),
        ];

        let authors = derive_authors(&posts);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].id, "a1");
        assert_eq!(authors[1].id, "a2");
    }

    #[test]
    fn test_derive_authors_first_occurrence_wins() {
        let mut posts = vec![post_by("p1", "a1", "Ada"), post_by("p2", "a1", "Ada")];
        // Same id under a changed display name later in the list
        posts[1].author.display_name = "Ada L.".to_string();

        let authors = derive_authors(&posts);
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].display_name, "Ada");
    }

    #[test]
    fn test_derive_authors_sorted_case_insensitively() {
        let posts = vec![
            post_by("p1", "a1", "zoe"),
            post_by("p2", "a2", "Ada"),
            post_by("p3", "a3", "grace"),
        ];

        let names: Vec<String> = derive_authors(&posts)
            .into_iter()
            .map(|a| a.display_name)
            .collect();
        assert_eq!(names, vec!["Ada", "grace", "zoe"]);
    }

    #[test]
    fn test_derive_authors_empty() {
        assert!(derive_authors(&[]).is_empty());
    }

    #[test]
    fn test_lookup_author_prefers_profile_fetch() {
        let api = StubApi::default();
        let profile = post_by("p0", "a1", "Ada From Profile").author;
        api.push_user(Ok(profile.clone()));

        let loaded = vec![post_by("p1", "a1", "Ada")];
        let author = tokio_test::block_on(lookup_author(&api, "a1", &loaded)).unwrap();
        assert_eq!(author, profile);
    }

    #[test]
    fn test_lookup_author_falls_back_to_embedded() {
        let api = StubApi::default();
        api.push_user(Err(crate::api::ApiError::LoadProfile));

        let loaded = vec![post_by("p1", "a2", "Grace"), post_by("p2", "a1", "Ada")];
        let author = tokio_test::block_on(lookup_author(&api, "a1", &loaded)).unwrap();
        assert_eq!(author.display_name, "Ada");
    }

    #[test]
    fn test_lookup_author_error_without_loaded_posts() {
        let api = StubApi::default();
        api.push_user(Err(crate::api::ApiError::LoadProfile));

        let result = tokio_test::block_on(lookup_author(&api, "a1", &[]));
        assert_eq!(result.unwrap_err(), crate::api::ApiError::LoadProfile);
    }
}
