use serde::Deserialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Scope of the route relation a way belongs to, as determined upstream
/// from `network=*` on the relation (e.g. `e-road` is international).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteNetwork {
    International,
    National,
    Regional,
    Local,
}
