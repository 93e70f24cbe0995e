use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;

use crate::domain::SessionUser;

/// What the signed-in identity may do in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    signed_in: bool,
    can_edit: bool,
}

impl Permissions {
    pub fn for_user(user: Option<&SessionUser>) -> Self {
        Self {
            signed_in: user.is_some(),
            can_edit: user.is_some_and(SessionUser::is_admin),
        }
    }

    pub fn can_view(&self) -> bool {
        self.signed_in
    }

    /// Role and status changes, single or bulk. Admin only.
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }
}

/// How the user detail page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    View,
    Edit,
}

/// Query string of the user detail page, e.g. `?mode=edit`.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub mode: Option<String>,
}

impl DetailMode {
    /// `mode=edit` asks for edit mode; it is only granted to editors.
    pub fn from_query(query: &DetailQuery, permissions: &Permissions) -> Self {
        if query.mode.as_deref() == Some("edit") && permissions.can_edit() {
            DetailMode::Edit
        } else {
            DetailMode::View
        }
    }

    /// Reads the mode from the query string of `uri`. An unparsable query
    /// string means view mode.
    pub fn from_uri(uri: &Uri, permissions: &Permissions) -> Self {
        let query = Query::<DetailQuery>::try_from_uri(uri)
            .map(|Query(query)| query)
            .unwrap_or_default();
        Self::from_query(&query, permissions)
    }
}
