//! Authorization policy engine.
//!
//! Every access decision in the system goes through these functions so the
//! HTTP layer and the store enforce an identical policy. Decisions are pure
//! functions of (actor, target, field): no I/O, no hidden state, and a
//! denial is a plain `false`, never an error.
//!
//! [`Role::Unknown`] appears in no allow-list, so a record carrying an
//! unrecognized role text simply has no permissions. The assignee carve-out
//! is keyed on identity, not role, and therefore still applies.

use crate::{Module, ModuleField, ProjectMember, Role, User};

/// Roles that may read every project and module without a membership link.
pub const PRIVILEGED_READERS: &[Role] = &[Role::Admin, Role::Pm, Role::Cto];

pub fn is_privileged_reader(role: Role) -> bool {
    PRIVILEGED_READERS.contains(&role)
}

fn is_member(actor: &User, members: &[ProjectMember]) -> bool {
    members.iter().any(|m| m.user_id == actor.id)
}

/// Admin, pm and cto read any project; everyone else needs a membership link.
pub fn can_read_project(actor: &User, members: &[ProjectMember]) -> bool {
    is_privileged_reader(actor.role) || is_member(actor, members)
}

pub fn can_create_project(actor: &User) -> bool {
    actor.role == Role::Admin
}

pub fn can_update_project(actor: &User) -> bool {
    matches!(actor.role, Role::Admin | Role::Pm)
}

pub fn can_delete_project(actor: &User) -> bool {
    actor.role == Role::Admin
}

/// Module visibility: privileged readers, members of the owning project,
/// and the assigned developer.
pub fn can_read_module(actor: &User, module: &Module, members: &[ProjectMember]) -> bool {
    is_privileged_reader(actor.role) || is_member(actor, members) || module.is_assigned_to(actor.id)
}

pub fn can_create_module(actor: &User) -> bool {
    matches!(actor.role, Role::Admin | Role::Pm)
}

pub fn can_delete_module(actor: &User) -> bool {
    actor.role == Role::Admin
}

/// Adding and removing project member links.
pub fn can_manage_members(actor: &User) -> bool {
    actor.role == Role::Admin
}

/// Field-level update check against the table in [`ModuleField`].
///
/// The assigned developer may write the dev-start and self-QA milestones
/// regardless of global role; every other grant is role-keyed.
pub fn can_edit_module_field(actor: &User, field: ModuleField, module: &Module) -> bool {
    if field.allowed_roles().contains(&actor.role) {
        return true;
    }
    field.allows_assignee() && module.is_assigned_to(actor.id)
}

/// Profile edits (name, avatar): admin or the user themself.
pub fn can_update_user(actor: &User, target: &User) -> bool {
    actor.role == Role::Admin || actor.id == target.id
}

/// Role changes are admin-only; a user may not promote themself.
pub fn can_change_role(actor: &User) -> bool {
    actor.role == Role::Admin
}

pub fn can_delete_user(actor: &User) -> bool {
    actor.role == Role::Admin
}
