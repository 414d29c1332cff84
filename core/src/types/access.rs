//! Roles, permissions, and the packed per-role limit bitmask.
//!
//! A limit packs one 3-bit octal slot per role: `Read = 0o4` and
//! `Write = 0o2` inside the slot, Operator in the lowest slot, then
//! Engineer, then Developer. `"644"` in a document therefore grants
//! Developer read+write, Engineer read, Operator read. SuperRoot is not
//! encoded — it bypasses the mask entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};


/// The kind of access being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Write,
}

impl Permission {
    /// Bit pattern inside a role's octal slot.
    fn mask(self) -> u32 {
        match self {
            Permission::Read => 0o4,
            Permission::Write => 0o2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
        }
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" | "r" => Ok(Permission::Read),
            "write" | "w" => Ok(Permission::Write),
            _ => Err(format!("Unknown permission: '{}' (expected read|write)", s)),
        }
    }
}


/// Caller privilege level, least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Operator,
    Engineer,
    Developer,
    SuperRoot,
}

impl Role {
    /// Bit offset of the role's octal slot in the packed limit.
    fn slot(self) -> u32 {
        match self {
            Role::Operator => 0,
            Role::Engineer => 3,
            Role::Developer => 6,
            Role::SuperRoot => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Engineer => "engineer",
            Role::Developer => "developer",
            Role::SuperRoot => "superroot",
        }
    }

    /// The roles that occupy a slot in the limit encoding.
    pub const MASKED: [Role; 3] = [Role::Operator, Role::Engineer, Role::Developer];
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "operator" => Ok(Role::Operator),
            "engineer" => Ok(Role::Engineer),
            "developer" => Ok(Role::Developer),
            "superroot" | "root" => Ok(Role::SuperRoot),
            _ => Err(format!(
                "Unknown role: '{}' (expected operator|engineer|developer|superroot)",
                s
            )),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


/// The single place the role × permission bit packing lives.
pub fn role_permission_bit(role: Role, permission: Permission) -> u32 {
    permission.mask() << role.slot()
}


/// Packed per-role permission bitmask stored on an entry.
///
/// Documents encode limits as octal strings (`"644"`); a bare integer is
/// accepted as literal bits for hand-written fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Limit(pub u32);

impl Limit {
    /// Parse an octal-encoded limit string.
    pub fn from_octal(s: &str) -> Option<Limit> {
        u32::from_str_radix(s, 8).ok().map(Limit)
    }

    /// Whether `role` holds `permission`. SuperRoot always does.
    pub fn allows(self, role: Role, permission: Permission) -> bool {
        if role == Role::SuperRoot {
            return true;
        }
        self.0 & role_permission_bit(role, permission) != 0
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}
