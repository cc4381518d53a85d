use uuid::Uuid;

use super::Registry;
use crate::caller::Caller;
use crate::data::user::User;
use crate::error::RegistryError;
use crate::role::Role;

impl Registry {
    /// Registers `target` with the role named by `role`. Admin only.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn add_user(
        &mut self,
        caller: &Caller,
        target: Uuid,
        name: &str,
        role: &str,
    ) -> Result<(), RegistryError> {
        self.require_role(caller, Role::Admin, "admins")?;
        let role = Role::parse(role)?;

        if self.role_of(target).is_registered() {
            return Err(RegistryError::UserAlreadyExists(target));
        }

        self.users.insert(target, User::new(target, name, role));
        tracing::info!("Added user {} as {}", target, role);

        Ok(())
    }

    /// Replaces the role of an existing, non-admin user. Admin only.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn change_user_role(
        &mut self,
        caller: &Caller,
        target: Uuid,
        role: &str,
    ) -> Result<(), RegistryError> {
        self.require_role(caller, Role::Admin, "admins")?;

        let current = self.role_of(target);
        if !current.is_registered() {
            return Err(RegistryError::UserNotFound(target));
        }
        if current == Role::Admin {
            return Err(RegistryError::ImmutableAdminRole(target));
        }
        let role = Role::parse(role)?;

        if let Some(user) = self.users.get_mut(&target) {
            user.role = role;
        }
        tracing::info!("Changed role of user {} from {} to {}", target, current, role);

        Ok(())
    }
}
