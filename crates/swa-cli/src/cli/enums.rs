use clap::ValueEnum;
use swa_config::EmulateRole;

/// Role used when emulating the platform locally
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Role {
    /// No client principal is attached
    #[value(name = "anonymous")]
    Anonymous,

    /// The development user `devUser` is attached
    #[value(name = "authenticated")]
    Authenticated,
}

impl From<Role> for EmulateRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Anonymous => EmulateRole::Anonymous,
            Role::Authenticated => EmulateRole::Authenticated,
        }
    }
}
