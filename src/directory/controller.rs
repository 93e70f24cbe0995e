use tracing::{debug, info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::{Role, Status, UserPatch, UserRecord};
use crate::session::Permissions;
use crate::user_actor::UserError;

use super::bulk::{BulkOutcome, BulkUpdateCoordinator};
use super::cache::UserCache;
use super::filter::{FilterState, RoleFilter, Sort, SortDirection, SortKey, StatusFilter, PAGE_SIZES};
use super::loader::DirectoryLoader;
use super::pipeline::{self, DirectoryView};
use super::selection::SelectionSet;
use super::DirectoryError;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loaded,
    Failed(UserError),
}

/// State behind the directory page: the cached list, toolbar inputs,
/// selection, and the last errors to show.
pub struct DirectoryController {
    loader: DirectoryLoader,
    bulk: BulkUpdateCoordinator,
    permissions: Permissions,
    cache: UserCache,
    filter: FilterState,
    selection: SelectionSet,
    load_state: LoadState,
    mutation_error: Option<UserError>,
}

impl DirectoryController {
    pub fn new(users: UserClient, permissions: Permissions) -> Self {
        Self {
            loader: DirectoryLoader::new(users.clone()),
            bulk: BulkUpdateCoordinator::new(users),
            permissions,
            cache: UserCache::default(),
            filter: FilterState::default(),
            selection: SelectionSet::new(),
            load_state: LoadState::Idle,
            mutation_error: None,
        }
    }

    // --- Loading ---

    /// Fetches the full list into the cache. A failure is kept as the
    /// page-level error; nothing is retried.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<usize, DirectoryError> {
        if !self.permissions.can_view() {
            return Err(DirectoryError::Forbidden);
        }

        let pending = self.loader.begin();
        match pending.wait().await {
            Ok(users) => {
                let count = users.len();
                self.cache.replace_all(users);
                self.load_state = LoadState::Loaded;
                info!(count, "Directory loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Directory load failed");
                self.load_state = LoadState::Failed(e.clone());
                Err(e.into())
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn load_error(&self) -> Option<&UserError> {
        match &self.load_state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        self.cache.users()
    }

    pub fn user(&self, id: &str) -> Option<&UserRecord> {
        self.cache.get(id)
    }

    // --- Pipeline ---

    pub fn view(&self) -> DirectoryView<'_> {
        pipeline::derive(self.cache.users(), &self.filter)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.filter.page = 1;
    }

    pub fn set_role_filter(&mut self, role: RoleFilter) {
        self.filter.role = role;
        self.filter.page = 1;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.filter.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), DirectoryError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(DirectoryError::InvalidPageSize(page_size));
        }
        self.filter.page_size = page_size;
        self.filter.page = 1;
        Ok(())
    }

    pub fn set_sort(&mut self, sort: Sort) {
        self.filter.sort = sort;
        self.filter.page = 1;
    }

    /// Column header click: same key flips direction, a new key sorts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let current = self.filter.sort;
        let direction = match (current.key == key, current.direction) {
            (true, SortDirection::Ascending) => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.set_sort(Sort::new(key, direction));
    }

    pub fn go_to_page(&mut self, page: usize) {
        let page_count = self.view().page_count();
        self.filter.page = page.clamp(1, page_count);
    }

    pub fn next_page(&mut self) {
        let current = self.view().page();
        self.go_to_page(current + 1);
    }

    pub fn prev_page(&mut self) {
        let current = self.view().page();
        self.go_to_page(current.saturating_sub(1));
    }

    /// Back to the default filters and first page, with nothing selected.
    pub fn reset(&mut self) {
        debug!("Resetting directory filters");
        self.filter = FilterState::default();
        self.selection.clear();
    }

    pub fn can_reset(&self) -> bool {
        !self.filter.is_default() || !self.selection.is_empty()
    }

    // --- Selection ---

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle_row(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// Header checkbox: selects or deselects the rows of the current page only.
    pub fn toggle_page(&mut self, checked: bool) {
        let ids = self.view().page_ids();
        if checked {
            self.selection.select_many(&ids);
        } else {
            self.selection.deselect_many(&ids);
        }
    }

    pub fn page_all_selected(&self) -> bool {
        self.selection.contains_all(&self.view().page_ids())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Mutations ---

    pub fn mutation_error(&self) -> Option<&UserError> {
        self.mutation_error.as_ref()
    }

    pub async fn bulk_set_role(&mut self, role: Role) -> Result<BulkOutcome, DirectoryError> {
        self.apply_bulk(UserPatch::role(role)).await
    }

    pub async fn bulk_set_status(&mut self, status: Status) -> Result<BulkOutcome, DirectoryError> {
        self.apply_bulk(UserPatch::status(status)).await
    }

    /// Applies `patch` to every selected id, in selection order. The
    /// selection is cleared only when the whole batch succeeds.
    #[instrument(skip(self), fields(selected = self.selection.len()))]
    async fn apply_bulk(&mut self, patch: UserPatch) -> Result<BulkOutcome, DirectoryError> {
        if !self.permissions.can_edit() {
            warn!("Bulk update refused for non-admin");
            return Err(DirectoryError::Forbidden);
        }

        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return Ok(BulkOutcome { updated: 0 });
        }

        match self.bulk.apply(&mut self.cache, &ids, &patch).await {
            Ok(outcome) => {
                self.selection.clear();
                self.mutation_error = None;
                Ok(outcome)
            }
            Err(e) => {
                self.mutation_error = Some(e.clone());
                Err(e.into())
            }
        }
    }

    /// Save from the user detail form. Admin only.
    #[instrument(skip(self))]
    pub async fn update_user(&mut self, id: &str, role: Role, status: Status) -> Result<UserRecord, DirectoryError> {
        if !self.permissions.can_edit() {
            return Err(DirectoryError::Forbidden);
        }

        match self.bulk.update_one(&mut self.cache, id, UserPatch::edit(role, status)).await {
            Ok(updated) => {
                self.mutation_error = None;
                Ok(updated)
            }
            Err(e) => {
                self.mutation_error = Some(e.clone());
                Err(e.into())
            }
        }
    }
}
