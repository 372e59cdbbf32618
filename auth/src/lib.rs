pub mod services {
    pub mod identity;
}

pub use services::identity::{IdentityClient, VerifiedUser};
