//! Parsing of `--place x,y,kind` arguments.

use balloon_defence_core::{DefenderCatalog, DefenderKind};
use glam::Vec2;

/// Defender placement requested on the command line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlacementArg {
    pub(crate) position: Vec2,
    /// Catalog index or case-insensitive name.
    pub(crate) kind: String,
}

impl PlacementArg {
    /// Resolves the kind against the catalog, trying an index before a name.
    pub(crate) fn resolve(&self, catalog: &DefenderCatalog) -> Option<DefenderKind> {
        if let Ok(index) = self.kind.parse::<u32>() {
            let kind = DefenderKind::new(index);
            return catalog.get(kind).map(|_| kind);
        }
        catalog.find_by_name(&self.kind)
    }
}

pub(crate) fn parse_placement(value: &str) -> Result<PlacementArg, String> {
    let mut fields = value.splitn(3, ',').map(str::trim);
    let (Some(x), Some(y), Some(kind)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected `x,y,kind`, got `{value}`"));
    };

    let x: f32 = x
        .parse()
        .map_err(|_| format!("invalid x coordinate `{x}`"))?;
    let y: f32 = y
        .parse()
        .map_err(|_| format!("invalid y coordinate `{y}`"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err("coordinates must be finite".to_owned());
    }
    if kind.is_empty() {
        return Err("defender kind must not be empty".to_owned());
    }

    Ok(PlacementArg {
        position: Vec2::new(x, y),
        kind: kind.to_owned(),
    })
}
