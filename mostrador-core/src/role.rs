use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Roles handed out by the authorization system. The pricing code only
/// reads them to look up discount ceilings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Vendedor,
    Supervisor,
    Gerente,
    Admin,
    Editor,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Vendedor,
        UserRole::Supervisor,
        UserRole::Gerente,
        UserRole::Admin,
        UserRole::Editor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Vendedor => "vendedor",
            UserRole::Supervisor => "supervisor",
            UserRole::Gerente => "gerente",
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        assert_eq!("vendedor".parse::<UserRole>().unwrap(), UserRole::Vendedor);
        assert_eq!(" Gerente ".parse::<UserRole>().unwrap(), UserRole::Gerente);
        assert!(matches!(
            "cajero".parse::<UserRole>(),
            Err(CoreError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_display_matches_serde() {
        for role in UserRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_default_role_is_vendedor() {
        assert_eq!(UserRole::default(), UserRole::Vendedor);
    }
}
