//! Pure state transitions for the in-memory user list.
//!
//! Each reducer takes the current list and an action and returns the next
//! list. Rows not named by the action are returned untouched and in order.

use ustr::Ustr;

use crate::models::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersAction {
    /// A suspend/reactivate mutation succeeded with this new flag value.
    SetSuspended { id: Ustr, suspended: bool },
    /// A delete mutation succeeded.
    Remove { id: Ustr },
}

pub fn reduce(users: Vec<UserRecord>, action: UsersAction) -> Vec<UserRecord> {
    match action {
        UsersAction::SetSuspended { id, suspended } => set_suspended(users, id, suspended),
        UsersAction::Remove { id } => remove(users, id),
    }
}

pub fn set_suspended(users: Vec<UserRecord>, id: Ustr, suspended: bool) -> Vec<UserRecord> {
    users
        .into_iter()
        .map(|user| {
            if user.id == id {
                UserRecord { suspended, ..user }
            } else {
                user
            }
        })
        .collect()
}

/// Drops the first row with `id`. Ids are unique server-side.
pub fn remove(mut users: Vec<UserRecord>, id: Ustr) -> Vec<UserRecord> {
    if let Some(index) = users.iter().position(|user| user.id == id) {
        users.remove(index);
    }
    users
}
