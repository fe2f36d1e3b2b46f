//! Typed user identifier over the kernel `Id` wrapper.

use kernel::id::Id;

pub struct UserMarker;
pub type UserId = Id<UserMarker>;
