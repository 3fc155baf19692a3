//! Unit normalization and conversion for household quantities
//!
//! Recipes and inventory documents carry free-text unit labels ("Kg",
//! "spsk.", "dåser"). This crate resolves them to canonical short codes and
//! converts quantities between units of the same dimension, optionally using
//! item-specific conversion factors (weight per piece, grams per purchase
//! unit) where no generic path exists.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A canonical unit after synonym resolution.
///
/// Every raw unit string maps to exactly one variant; labels outside the
/// synonym table are carried through unchanged as [`Unit::Other`] so that
/// uncommon units never break the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Gram,
    Kilogram,
    Milliliter,
    Deciliter,
    Liter,
    Teaspoon,
    Tablespoon,
    Piece,
    Clove,
    Can,
    Bunch,
    Pinch,
    /// Unrecognized label, lower-cased and trimmed.
    Other(String),
}

/// Measurement dimension a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Mass,
    Volume,
    Count,
}

impl Unit {
    /// Resolves a raw unit label against the synonym table.
    ///
    /// Lower-cases and trims, then matches with a single trailing period
    /// ignored ("stk." counts as "stk"). The period strip applies to the
    /// lookup only; an unrecognized label passes through exactly as
    /// lower-cased and trimmed, which keeps [`normalize`] idempotent.
    /// The synonym sets are disjoint, so lookup order does not matter.
    pub fn parse(raw: &str) -> Self {
        let label = raw.trim().to_lowercase();
        let looked_up = match label.strip_suffix('.').unwrap_or(&label) {
            "g" | "gram" | "grams" => Some(Unit::Gram),
            "kg" | "kilogram" | "kilograms" => Some(Unit::Kilogram),
            "ml" | "milliliter" | "milliliters" => Some(Unit::Milliliter),
            "dl" => Some(Unit::Deciliter),
            "l" | "liter" | "liters" => Some(Unit::Liter),
            "tsk" => Some(Unit::Teaspoon),
            "spsk" => Some(Unit::Tablespoon),
            "stk" | "styk" | "styks" => Some(Unit::Piece),
            "fed" => Some(Unit::Clove),
            "dåse" | "dåser" => Some(Unit::Can),
            "bundt" => Some(Unit::Bunch),
            "knivspids" => Some(Unit::Pinch),
            _ => None,
        };
        match looked_up {
            Some(unit) => unit,
            None => Unit::Other(label),
        }
    }

    /// The canonical short code for this unit.
    pub fn code(&self) -> &str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Deciliter => "dl",
            Unit::Liter => "l",
            Unit::Teaspoon => "tsk",
            Unit::Tablespoon => "spsk",
            Unit::Piece => "stk",
            Unit::Clove => "fed",
            Unit::Can => "dåse",
            Unit::Bunch => "bundt",
            Unit::Pinch => "knivspids",
            Unit::Other(label) => label,
        }
    }

    /// Dimension and factor relative to the dimension's base unit
    /// (grams for mass, milliliters for volume, pieces for count).
    ///
    /// Clove, can, bunch and pinch are treated as count equivalents with
    /// factor 1, not fractional pieces.
    fn base_factor(&self) -> Option<(Dimension, f64)> {
        match self {
            Unit::Gram => Some((Dimension::Mass, 1.0)),
            Unit::Kilogram => Some((Dimension::Mass, 1000.0)),
            Unit::Milliliter => Some((Dimension::Volume, 1.0)),
            Unit::Deciliter => Some((Dimension::Volume, 100.0)),
            Unit::Liter => Some((Dimension::Volume, 1000.0)),
            Unit::Teaspoon => Some((Dimension::Volume, 5.0)),
            Unit::Tablespoon => Some((Dimension::Volume, 15.0)),
            Unit::Piece | Unit::Clove | Unit::Can | Unit::Bunch | Unit::Pinch => {
                Some((Dimension::Count, 1.0))
            }
            Unit::Other(_) => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        Unit::parse(&raw)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_string()
    }
}

/// Normalizes a raw unit label to its canonical short code.
///
/// Unrecognized input is returned lower-cased and trimmed, never an error.
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    Unit::parse(raw).code().to_string()
}

/// Item-specific conversion factors carried on an inventory item.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemFacts {
    /// Grams contained in one purchase unit of the item.
    pub grams_per_unit: Option<f64>,
    /// Weight in grams of a single piece.
    pub weight_per_piece: Option<f64>,
}

/// A successful conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted {
    pub amount: f64,
    /// The source unit already was the target unit; no arithmetic applied.
    pub direct_match: bool,
}

/// Conversion failure. Non-fatal by construction: callers decide whether to
/// fall back to the raw quantity or skip the line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("no conversion path from '{from}' to '{to}'")]
    NoPath { from: String, to: String },
}

/// Converts `quantity` from a raw unit label into `target`.
///
/// Resolution order:
/// 1. identity after normalization (direct match, quantity unchanged);
/// 2. piece to grams via `facts.weight_per_piece`;
/// 3. any source to grams via `facts.grams_per_unit` — the item-specific
///    factor wins over the generic ladders;
/// 4. same-dimension ladder (volume via ml, mass via g, count 1:1).
///
/// There is no path between dimensions (e.g. volume to mass) without an
/// item-specific factor; such conversions return [`ConversionError::NoPath`]
/// naming both units.
pub fn convert_to_base_unit(
    quantity: f64,
    from_unit: &str,
    target: &Unit,
    facts: Option<&ItemFacts>,
) -> Result<Converted, ConversionError> {
    let from = Unit::parse(from_unit);

    if from == *target {
        return Ok(Converted {
            amount: quantity,
            direct_match: true,
        });
    }

    if let Some(facts) = facts {
        if from == Unit::Piece && *target == Unit::Gram {
            if let Some(weight) = facts.weight_per_piece {
                return Ok(Converted {
                    amount: quantity * weight,
                    direct_match: false,
                });
            }
        }
        if *target == Unit::Gram {
            if let Some(grams) = facts.grams_per_unit {
                return Ok(Converted {
                    amount: quantity * grams,
                    direct_match: false,
                });
            }
        }
    }

    if let (Some((from_dim, from_factor)), Some((target_dim, target_factor))) =
        (from.base_factor(), target.base_factor())
    {
        if from_dim == target_dim {
            return Ok(Converted {
                amount: quantity * from_factor / target_factor,
                direct_match: false,
            });
        }
    }

    Err(ConversionError::NoPath {
        from: from.code().to_string(),
        to: target.code().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "Kg", "KILOGRAM", "kilograms", " spsk. ", "Dåser", "stk.", "ml",
            "knivspids", "pose", "pose.", "pose..", "Håndfuld", "",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn synonym_groups_map_to_one_code() {
        let groups: &[(&str, &[&str])] = &[
            ("g", &["g", "gram", "grams", "G", "Gram."]),
            ("kg", &["kg", "kilogram", "kilograms", "Kg", "KILOGRAM"]),
            ("ml", &["ml", "milliliter", "milliliters", "ML."]),
            ("l", &["l", "liter", "liters", "L"]),
            ("stk", &["stk", "stk.", "styk", "styks", "Stk"]),
            ("tsk", &["tsk", "tsk.", "Tsk"]),
            ("spsk", &["spsk", "spsk.", "SPSK"]),
            ("dl", &["dl", "dl.", "DL"]),
            ("fed", &["fed", "Fed"]),
            ("dåse", &["dåse", "dåser", "DÅSE"]),
            ("bundt", &["bundt"]),
            ("knivspids", &["knivspids", "Knivspids."]),
        ];
        for (code, members) in groups {
            for member in *members {
                assert_eq!(normalize(member), *code, "{member:?} should map to {code}");
            }
        }
    }

    #[test]
    fn unrecognized_labels_pass_through() {
        assert_eq!(normalize(" Pose "), "pose");
        assert_eq!(Unit::parse("pose"), Unit::Other("pose".to_string()));
        // Only the synonym lookup ignores a trailing period; an unmatched
        // label keeps every character it came with.
        assert_eq!(normalize("pose."), "pose.");
        assert_eq!(normalize("pose.."), "pose..");
    }

    #[test]
    fn identity_conversion_is_a_direct_match() {
        for unit in ["g", "l", "stk", "pose"] {
            let target = Unit::parse(unit);
            let result = convert_to_base_unit(2.5, unit, &target, None).unwrap();
            assert_eq!(result.amount, 2.5);
            assert!(result.direct_match);
        }
    }

    #[test]
    fn volume_ladder_to_milliliters() {
        let ml = Unit::Milliliter;
        assert_eq!(convert_to_base_unit(1.0, "l", &ml, None).unwrap().amount, 1000.0);
        assert_eq!(convert_to_base_unit(2.0, "dl", &ml, None).unwrap().amount, 200.0);
        assert_eq!(convert_to_base_unit(1.0, "spsk", &ml, None).unwrap().amount, 15.0);
        assert_eq!(convert_to_base_unit(3.0, "tsk", &ml, None).unwrap().amount, 15.0);
    }

    #[test]
    fn mass_ladder_to_grams() {
        let g = Unit::Gram;
        assert_eq!(convert_to_base_unit(1.5, "kg", &g, None).unwrap().amount, 1500.0);
    }

    #[test]
    fn round_trips_within_tolerance() {
        let cases = [("l", Unit::Milliliter), ("kg", Unit::Gram), ("spsk", Unit::Milliliter)];
        for (from, target) in cases {
            let forward = convert_to_base_unit(0.7, from, &target, None).unwrap();
            let back =
                convert_to_base_unit(forward.amount, target.code(), &Unit::parse(from), None)
                    .unwrap();
            assert!((back.amount - 0.7).abs() < 1e-9, "{from} round trip drifted");
        }
    }

    #[test]
    fn piece_to_grams_needs_weight_per_piece() {
        let g = Unit::Gram;
        let facts = ItemFacts {
            weight_per_piece: Some(60.0),
            ..ItemFacts::default()
        };
        let result = convert_to_base_unit(3.0, "stk", &g, Some(&facts)).unwrap();
        assert_eq!(result.amount, 180.0);
        assert!(!result.direct_match);

        let err = convert_to_base_unit(3.0, "stk", &g, None).unwrap_err();
        assert_eq!(
            err,
            ConversionError::NoPath {
                from: "stk".to_string(),
                to: "g".to_string()
            }
        );
    }

    #[test]
    fn item_factor_wins_over_generic_ladder() {
        // A can of chopped tomatoes holds 400 g; the item factor applies
        // even though cans would otherwise only convert 1:1 to pieces.
        let facts = ItemFacts {
            grams_per_unit: Some(400.0),
            ..ItemFacts::default()
        };
        let result = convert_to_base_unit(2.0, "dåse", &Unit::Gram, Some(&facts)).unwrap();
        assert_eq!(result.amount, 800.0);
    }

    #[test]
    fn count_like_units_convert_one_to_one_to_pieces() {
        for unit in ["fed", "dåse", "bundt", "knivspids"] {
            let result = convert_to_base_unit(2.0, unit, &Unit::Piece, None).unwrap();
            assert_eq!(result.amount, 2.0, "{unit} should count 1:1 as stk");
        }
    }

    #[test]
    fn incompatible_dimensions_have_no_path() {
        let err = convert_to_base_unit(1.0, "spsk", &Unit::Piece, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no conversion path from 'spsk' to 'stk'"
        );

        let err = convert_to_base_unit(1.0, "ml", &Unit::Gram, None).unwrap_err();
        assert!(matches!(err, ConversionError::NoPath { .. }));
    }
}
