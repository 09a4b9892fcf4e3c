use newsdesk_core::models::{FavoriteIds, FavoritesCounter, NewsItem, User};
use serde::Serialize;

#[derive(Serialize)]
pub struct NewsItemJson<'a> {
    #[serde(flatten)]
    pub item: &'a NewsItem,
    pub favorite: bool,
}

#[derive(Serialize)]
pub struct CounterJson {
    pub count: usize,
    pub visible: bool,
    pub label: String,
}

impl From<&FavoritesCounter> for CounterJson {
    fn from(counter: &FavoritesCounter) -> Self {
        Self {
            count: counter.count,
            visible: counter.is_visible(),
            label: counter.label(),
        }
    }
}

pub fn news_json<'a>(items: &'a [NewsItem], favorites: &FavoriteIds) -> Vec<NewsItemJson<'a>> {
    items
        .iter()
        .map(|item| NewsItemJson {
            item,
            favorite: favorites.contains(&item.id),
        })
        .collect()
}

/// One line per post: favorite marker, id, category and title
pub fn format_news_list(items: &[NewsItem], favorites: &FavoriteIds) -> String {
    if items.is_empty() {
        return "No posts found.".to_string();
    }

    let id_width = items.iter().map(|n| n.id.len()).max().unwrap_or(0);
    items
        .iter()
        .map(|item| {
            let marker = if favorites.contains(&item.id) { '*' } else { ' ' };
            format!(
                "{} {:>width$}  [{}] {}",
                marker,
                item.id,
                item.category,
                item.title,
                width = id_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_news_detail(item: &NewsItem, is_favorite: bool) -> String {
    let date = item
        .formatted_date()
        .unwrap_or_else(|| "Invalid date".to_string());
    let star = if is_favorite { "  * favorite" } else { "" };

    format!(
        "{}{}\n{} | {} | {}\n\n{}\n\nImage: {}",
        item.title, star, item.category, item.source, date, item.description, item.image_url
    )
}

pub fn format_toggle(id: &str, now_favorite: bool) -> String {
    if now_favorite {
        format!("Added post {} to favorites", id)
    } else {
        format!("Removed post {} from favorites", id)
    }
}

/// One line per user: id, full name, email and company
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let id_width = users.iter().map(|u| u.id.to_string().len()).max().unwrap_or(0);
    let name_width = users.iter().map(|u| u.full_name().chars().count()).max().unwrap_or(0);
    users
        .iter()
        .map(|user| {
            let line = format!(
                "{:>id_width$}  {:<name_width$}  {}",
                user.id,
                user.full_name(),
                user.email,
                id_width = id_width,
                name_width = name_width
            );
            if user.company.name.is_empty() {
                line
            } else {
                format!("{}  ({})", line, user.company.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::models::Post;

    fn items() -> Vec<NewsItem> {
        vec![
            NewsItem::from(&Post::new("1", "React Native Testing", "Body").with_category("Tech")),
            NewsItem::from(&Post::new("12", "Mobile App Design", "Body")),
        ]
    }

    #[test]
    fn test_list_marks_favorites() {
        let favorites: FavoriteIds = ["12"].into_iter().collect();
        let out = format_news_list(&items(), &favorites);

        assert_eq!(
            out,
            "   1  [Tech] React Native Testing\n* 12  [General] Mobile App Design"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_news_list(&[], &FavoriteIds::new()), "No posts found.");
    }

    #[test]
    fn test_detail_with_invalid_date() {
        let out = format_news_detail(&items()[0], true);
        assert!(out.starts_with("React Native Testing  * favorite\n"));
        assert!(out.contains("Invalid date"));
    }

    #[test]
    fn test_json_flags_favorites() {
        let favorites: FavoriteIds = ["1"].into_iter().collect();
        let items = items();
        let json = serde_json::to_value(news_json(&items, &favorites)).unwrap();

        assert_eq!(json[0]["favorite"], true);
        assert_eq!(json[1]["favorite"], false);
        assert_eq!(json[1]["category"], "General");
    }

    #[test]
    fn test_toggle_message() {
        assert_eq!(format_toggle("3", true), "Added post 3 to favorites");
        assert_eq!(format_toggle("3", false), "Removed post 3 from favorites");
    }

    #[test]
    fn test_user_list() {
        let users = vec![
            User::new(1, "Ana", "Ruiz", "ana@x.io").with_company("Acme"),
            User::new(10, "María", "González", "maria@x.io"),
        ];

        assert_eq!(
            format_user_list(&users),
            " 1  Ana Ruiz        ana@x.io  (Acme)\n10  María González  maria@x.io"
        );
        assert_eq!(format_user_list(&[]), "No users found.");
    }
}
