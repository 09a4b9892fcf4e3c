use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::Error;

/// Key the user directory is sorted on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Email,
    Company,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "email" => Ok(SortBy::Email),
            "company" => Ok(SortBy::Company),
            other => Err(Error::InvalidInput(format!(
                "unknown sort key '{}', expected name, email or company",
                other
            ))),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::Name => "name",
            SortBy::Email => "email",
            SortBy::Company => "company",
        })
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::InvalidInput(format!(
                "unknown sort order '{}', expected asc or desc",
                other
            ))),
        }
    }
}

/// Search and sort settings for the user directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    /// Raw term as typed, whitespace included
    pub search_term: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// State transitions accepted by [`UsersState::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum UsersAction {
    /// Select a user, or clear the selection with `None`
    SetSelectedUser(Option<User>),
    SetSearchTerm(String),
    SetSortBy(SortBy),
    SetSortOrder(SortOrder),
    SetIsRefreshing(bool),
    /// Back to the default filters; selection and refresh flag are kept
    ResetFilters,
}

/// Selection, filters and refresh flag of the user directory.
///
/// The users themselves come from a [`UserSource`](crate::source::UserSource)
/// and are passed to [`filtered_and_sorted_users`](crate::selectors::filtered_and_sorted_users)
/// alongside [`UsersState::filters`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersState {
    selected_user: Option<User>,
    filters: UserFilters,
    is_refreshing: bool,
}

impl UsersState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selected_user.as_ref()
    }

    pub fn filters(&self) -> &UserFilters {
        &self.filters
    }

    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    pub fn reduce(&mut self, action: UsersAction) {
        match action {
            UsersAction::SetSelectedUser(user) => self.selected_user = user,
            UsersAction::SetSearchTerm(term) => self.filters.search_term = term,
            UsersAction::SetSortBy(sort_by) => self.filters.sort_by = sort_by,
            UsersAction::SetSortOrder(order) => self.filters.sort_order = order,
            UsersAction::SetIsRefreshing(flag) => self.is_refreshing = flag,
            UsersAction::ResetFilters => self.filters = UserFilters::default(),
        }
    }
}
