use std::fmt::Display;

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::model::{admin::Admin, voter::Voter};

/// A kind of account that can hold an [`super::AuthToken`].
pub trait User {
    /// The rights of this user type.
    const RIGHTS: Rights;
}

/// What a token lets its holder do. Serialized as a number in the JWT.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Voter = 0,
    Admin = 1,
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Voter => "voter",
                Self::Admin => "admin",
            }
        )
    }
}

impl User for Voter {
    const RIGHTS: Rights = Rights::Voter;
}

impl User for Admin {
    const RIGHTS: Rights = Rights::Admin;
}
