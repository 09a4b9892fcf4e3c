//! Derived views over [`PostsState`](crate::state::PostsState) and the user directory.
//!
//! Everything here is pure. [`FavoritePostsMemo`] caches the one selector
//! that walks both collections, keyed on the identity of its inputs.

use std::sync::Arc;

use crate::models::{FavoriteIds, Post, User};
use crate::state::{SortBy, SortOrder, UserFilters};

/// Posts whose id is in `favorite_ids`, in the order of `posts`.
///
/// Favorite ids with no matching post are ignored.
pub fn favorite_posts(posts: &[Post], favorite_ids: &FavoriteIds) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| favorite_ids.contains(&post.id))
        .cloned()
        .collect()
}

pub fn is_post_favorite(favorite_ids: &FavoriteIds, id: &str) -> bool {
    favorite_ids.contains(id)
}

pub fn favorites_count(favorite_ids: &FavoriteIds) -> usize {
    favorite_ids.len()
}

/// True iff the query has something other than whitespace
pub fn has_search_query(query: &str) -> bool {
    !query.trim().is_empty()
}

/// `filtered_posts` while a query is active, otherwise `all_posts`.
///
/// Generic so the store can hand over its `Arc`s and get one back unchanged.
pub fn posts_to_display<'a, P: ?Sized>(query: &str, filtered_posts: &'a P, all_posts: &'a P) -> &'a P {
    if has_search_query(query) {
        filtered_posts
    } else {
        all_posts
    }
}

/// Users matching `filters.search_term`, sorted by `filters.sort_by`.
///
/// A term with nothing but whitespace matches everyone. Otherwise the term is
/// lower-cased (not trimmed) and looked for in the full name, the email and the
/// company name. Sort keys compare lower-cased; ties keep their input order.
pub fn filtered_and_sorted_users(users: &[User], filters: &UserFilters) -> Vec<User> {
    let mut result: Vec<User> = if filters.search_term.trim().is_empty() {
        users.to_vec()
    } else {
        let term = filters.search_term.to_lowercase();
        users
            .iter()
            .filter(|user| {
                user.full_name().to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
                    || user.company.name.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    };

    result.sort_by(|a, b| {
        let ordering = sort_key(a, filters.sort_by).cmp(&sort_key(b, filters.sort_by));
        match filters.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    tracing::trace!(total = users.len(), shown = result.len(), "users filtered");
    result
}

fn sort_key(user: &User, sort_by: SortBy) -> String {
    match sort_by {
        SortBy::Name => user.full_name().to_lowercase(),
        SortBy::Email => user.email.to_lowercase(),
        SortBy::Company => user.company.name.to_lowercase(),
    }
}

/// Single-entry cache for [`favorite_posts`].
///
/// Holds on to the inputs of the last call, so a pointer match means the
/// inputs really are unchanged.
#[derive(Debug, Default)]
pub struct FavoritePostsMemo {
    last: Option<MemoEntry>,
}

#[derive(Debug)]
struct MemoEntry {
    posts: Arc<Vec<Post>>,
    favorite_ids: Arc<FavoriteIds>,
    result: Arc<Vec<Post>>,
}

impl FavoritePostsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, posts: &Arc<Vec<Post>>, favorite_ids: &Arc<FavoriteIds>) -> Arc<Vec<Post>> {
        if let Some(entry) = &self.last {
            if Arc::ptr_eq(&entry.posts, posts) && Arc::ptr_eq(&entry.favorite_ids, favorite_ids) {
                return Arc::clone(&entry.result);
            }
        }

        let result = Arc::new(favorite_posts(posts, favorite_ids));
        self.last = Some(MemoEntry {
            posts: Arc::clone(posts),
            favorite_ids: Arc::clone(favorite_ids),
            result: Arc::clone(&result),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection;
    use proptest::prelude::*;

    fn sample_posts() -> Vec<Post> {
        vec![
            Post::new("1", "React Native Testing", ""),
            Post::new("2", "JavaScript Fundamentals", ""),
            Post::new("3", "Mobile App Design", ""),
        ]
    }

    #[test]
    fn test_favorite_posts_follow_post_order() {
        let favorites: FavoriteIds = ["3", "1"].into_iter().collect();
        let result = favorite_posts(&sample_posts(), &favorites);

        let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(favorites_count(&favorites), 2);
    }

    #[test]
    fn test_favorite_posts_ignore_unknown_ids() {
        let posts = sample_posts();
        let favorites: FavoriteIds = ["2", "42"].into_iter().collect();
        let result = favorite_posts(&posts, &favorites);

        assert_eq!(result.len(), 1);
        assert!(result.iter().all(|p| posts.contains(p)));
        assert!(result.iter().all(|p| favorites.contains(&p.id)));
    }

    #[test]
    fn test_is_post_favorite_is_exact() {
        let favorites: FavoriteIds = ["1"].into_iter().collect();
        assert!(is_post_favorite(&favorites, "1"));
        assert!(!is_post_favorite(&favorites, "01"));
        assert!(!is_post_favorite(&FavoriteIds::new(), "1"));
    }

    #[test]
    fn test_has_search_query() {
        assert!(!has_search_query(""));
        assert!(!has_search_query(" \t "));
        assert!(has_search_query(" react "));
    }

    #[test]
    fn test_posts_to_display() {
        let all = sample_posts();
        let filtered = vec![all[0].clone()];

        assert_eq!(posts_to_display("react", &filtered, &all).len(), 1);
        assert_eq!(posts_to_display("  ", &filtered, &all).len(), 3);
    }

    #[test]
    fn test_memo_reuses_result_for_same_inputs() {
        let posts = Arc::new(sample_posts());
        let favorites: Arc<FavoriteIds> = Arc::new(["2"].into_iter().collect());
        let mut memo = FavoritePostsMemo::new();

        let first = memo.get(&posts, &favorites);
        let second = memo.get(&posts, &favorites);
        assert!(Arc::ptr_eq(&first, &second));

        let changed: Arc<FavoriteIds> = Arc::new(["2", "3"].into_iter().collect());
        let third = memo.get(&posts, &changed);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.len(), 2);
    }

    fn directory() -> Vec<User> {
        vec![
            User::new(1, "Juan", "Pérez", "juan.perez@email.com").with_company("Tech Solutions"),
            User::new(2, "María", "González", "maria.gonzalez@email.com").with_company("Design Studio"),
            User::new(3, "ana", "Ruiz", "a.ruiz@acme.io").with_company("Acme"),
        ]
    }

    fn user_ids(users: &[User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    fn filters(term: &str, sort_by: SortBy, sort_order: SortOrder) -> UserFilters {
        UserFilters {
            search_term: term.to_string(),
            sort_by,
            sort_order,
        }
    }

    #[test]
    fn test_users_default_sort_is_name_ignoring_case() {
        let result = filtered_and_sorted_users(&directory(), &UserFilters::default());
        assert_eq!(user_ids(&result), [3, 1, 2]);
    }

    #[test]
    fn test_users_sort_by_company_desc() {
        let result =
            filtered_and_sorted_users(&directory(), &filters("", SortBy::Company, SortOrder::Desc));
        assert_eq!(user_ids(&result), [1, 2, 3]);
    }

    #[test]
    fn test_users_sort_by_email() {
        let result =
            filtered_and_sorted_users(&directory(), &filters("", SortBy::Email, SortOrder::Asc));
        assert_eq!(user_ids(&result), [3, 1, 2]);
    }

    #[test]
    fn test_users_search_over_name_email_and_company() {
        let by_name = filtered_and_sorted_users(&directory(), &filters("JUAN P", SortBy::Name, SortOrder::Asc));
        assert_eq!(user_ids(&by_name), [1]);

        let by_email = filtered_and_sorted_users(&directory(), &filters("acme.io", SortBy::Name, SortOrder::Asc));
        assert_eq!(user_ids(&by_email), [3]);

        let by_company = filtered_and_sorted_users(&directory(), &filters("studio", SortBy::Name, SortOrder::Asc));
        assert_eq!(user_ids(&by_company), [2]);
    }

    #[test]
    fn test_users_search_term_is_not_trimmed() {
        // surrounding spaces are part of the needle
        let result = filtered_and_sorted_users(&directory(), &filters(" juan ", SortBy::Name, SortOrder::Asc));
        assert!(result.is_empty());

        let result = filtered_and_sorted_users(&directory(), &filters("   ", SortBy::Name, SortOrder::Asc));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_users_ties_keep_input_order() {
        let users = vec![
            User::new(1, "Sam", "Lee", "one@x.io"),
            User::new(2, "sam", "lee", "two@x.io"),
        ];
        let asc = filtered_and_sorted_users(&users, &UserFilters::default());
        assert_eq!(user_ids(&asc), [1, 2]);
    }

    fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
        collection::vec(("[0-9]{1,2}", "[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,12}"), 0..12).prop_map(|rows| {
            rows.into_iter()
                .map(|(id, title, content)| Post::new(id, title, content))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_favorite_posts_are_a_subset(
            posts in arb_posts(),
            ids in collection::vec("[0-9]{1,2}", 0..8)
        ) {
            let favorites: FavoriteIds = ids.into_iter().collect();
            let result = favorite_posts(&posts, &favorites);

            prop_assert!(result.iter().all(|p| posts.contains(p)));
            prop_assert!(result.iter().all(|p| favorites.contains(&p.id)));

            let expected: Vec<&Post> = posts.iter().filter(|p| favorites.as_slice().contains(&p.id)).collect();
            prop_assert_eq!(result.iter().collect::<Vec<_>>(), expected);
        }

        #[test]
        fn test_posts_to_display_picks_by_query(query in "[a-z ]{0,6}") {
            let all = vec![Post::new("1", "a", ""), Post::new("2", "b", "")];
            let filtered = vec![all[1].clone()];

            let shown = posts_to_display(&query, &filtered, &all);
            if query.trim().is_empty() {
                prop_assert_eq!(shown, &all);
            } else {
                prop_assert_eq!(shown, &filtered);
            }
        }

        #[test]
        fn test_filtered_users_are_the_matches_in_order(
            names in collection::vec(("[a-zA-Z]{1,6}", "[a-zA-Z]{1,6}", "[a-z]{1,6}"), 0..10),
            term in "[a-zA-Z ]{0,4}",
            desc in any::<bool>()
        ) {
            let users: Vec<User> = names
                .into_iter()
                .enumerate()
                .map(|(i, (first, last, company))| {
                    User::new(i as i64, first.clone(), last, format!("{}@mail.test", first)).with_company(company)
                })
                .collect();
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            let result = filtered_and_sorted_users(&users, &filters(&term, SortBy::Name, order));

            let needle = term.to_lowercase();
            let matching = |u: &User| {
                needle.trim().is_empty()
                    || format!("{} {}", u.firstname, u.lastname).to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.company.name.to_lowercase().contains(&needle)
            };

            for user in &users {
                prop_assert_eq!(matching(user), result.iter().any(|r| r.id == user.id));
            }
            for pair in result.windows(2) {
                let (a, b) = (pair[0].full_name().to_lowercase(), pair[1].full_name().to_lowercase());
                if desc {
                    prop_assert!(a >= b);
                } else {
                    prop_assert!(a <= b);
                }
            }
        }
    }
}
