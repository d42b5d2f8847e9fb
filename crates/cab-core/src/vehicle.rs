//! Vehicle kinds shared by the simulation and the asset manifest.

use crate::Direction;

/// The sprite family a car is drawn with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CarKind {
    /// Privately owned car (default traffic).
    #[default]
    Private,
    /// A driver hired by the player.
    Taxi,
}

impl CarKind {
    pub const ALL: [CarKind; 2] = [CarKind::Private, CarKind::Taxi];

    /// Human-readable label, used in asset paths.
    pub fn as_str(self) -> &'static str {
        match self {
            CarKind::Private => "private",
            CarKind::Taxi    => "taxi",
        }
    }

    /// Sprite path for this kind facing `heading`.
    pub fn sprite(self, heading: Direction) -> String {
        format!("assets/objects/{}-car-{}.png", self.as_str(), heading.as_str())
    }
}

impl std::fmt::Display for CarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
