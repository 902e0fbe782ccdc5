use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Values of the access restriction hierarchy (`access`, `vehicle`,
/// `motor_vehicle`, `motorcar`, `foot`, ...).
///
/// A profile sorts these into a restricted set and an intended set;
/// values in neither set (e.g. `destination`) decide nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AccessValue {
    /// Public access, legal right of way
    Yes,
    /// Access prohibited by law
    No,
    /// Access restricted by an unspecified rule
    Restricted,
    /// Private property, owner's permission required
    Private,
    /// Tolerated access, permission may be withdrawn
    Permissive,
    /// Explicit designation for this mode (shown by signs/markings)
    Designated,
    /// Designated by an official authority
    Official,
    /// Legal access exists but officially discouraged
    Discouraged,
    /// Access restricted to customers only
    Customers,
    /// Access restricted to local traffic/destination only
    Destination,
    /// Access restricted to agricultural vehicles
    Agricultural,
    /// Access restricted to forestry vehicles
    Forestry,
    /// Access restricted to delivery vehicles
    Delivery,
    /// Military access only
    Military,
    /// Emergency services only
    Emergency,
    /// Permit required for access
    Permit,
}

impl AccessValue {
    /// Parses one alternative of a restriction value. Surrounding
    /// whitespace is ignored, unknown values yield `None`.
    #[inline]
    pub fn parse(value: &str) -> Option<AccessValue> {
        value.trim().parse().ok()
    }

    /// Parses a semicolon-separated list such as `private;delivery`,
    /// skipping alternatives that are not access values.
    pub fn alternatives(value: &str) -> impl Iterator<Item = AccessValue> + '_ {
        value.split(';').filter_map(AccessValue::parse)
    }
}
