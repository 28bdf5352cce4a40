//! Role-based capability gating.

use serde::Deserialize;

/// Who is using the catalog, as configured by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    #[serde(alias = "administrator")]
    Admin,
    #[serde(alias = "viewer", alias = "read-only")]
    User,
}

/// What a session may do with the catalog. Only the constants below exist;
/// query them through `can_read` and `can_mutate`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Capabilities {
    read: bool,
    mutate: bool,
}

impl Capabilities {
    pub const READ_ONLY: Self = Self {
        read: true,
        mutate: false,
    };
    pub const FULL: Self = Self {
        read: true,
        mutate: true,
    };

    pub fn can_read(self) -> bool {
        self.read
    }

    pub fn can_mutate(self) -> bool {
        self.mutate
    }
}

impl Role {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Admin => Capabilities::FULL,
            Role::User => Capabilities::READ_ONLY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_mutate_user_cannot() {
        assert!(Role::Admin.capabilities().can_mutate());
        assert!(!Role::User.capabilities().can_mutate());
        assert!(Role::User.capabilities().can_read());
    }

    #[test]
    fn default_role_is_admin() {
        assert_eq!(Role::default(), Role::Admin);
    }
}
