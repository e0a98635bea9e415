//! Human-readable depiction of a set's levels, for debugging.
//!
//! Rendering only reads the set through its public cursor API: the element
//! count, the ordered elements and each node's level count.
//!
//! ```text
//! ------------------------------------------
//! 3 elements
//!  -----------2--------
//! |           |        |
//!  -----1-----2-----3--
//! ```

use std::fmt;

use crate::set::SkipSet;

/// Width of one element column.
const CELL: usize = 6;

/// Short display string for an element.
pub trait Label {
    fn label(&self) -> String;
}

macro_rules! label_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Label for $ty {
                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

label_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool, str, String,
);

/// Significant digits kept in float labels.
const PRECISION: i32 = 6;

impl Label for f64 {
    /// `%g` style: six significant digits, scientific notation for very
    /// large or small magnitudes, trailing fractional zeros dropped.
    fn label(&self) -> String {
        if !self.is_finite() {
            return self.to_string();
        }
        // the rounded scientific form decides the exponent
        let scientific = format!("{:.*e}", (PRECISION - 1) as usize, self);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return scientific;
        };
        let exponent: i32 = match exponent.parse() {
            Ok(exponent) => exponent,
            Err(_) => return scientific,
        };
        if exponent < -4 || exponent >= PRECISION {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!(
                "{}e{sign}{:02}",
                trim_fraction(mantissa.to_string()),
                exponent.abs()
            )
        } else {
            let decimals = (PRECISION - 1 - exponent) as usize;
            trim_fraction(format!("{self:.decimals$}"))
        }
    }
}

impl Label for f32 {
    fn label(&self) -> String {
        f64::from(*self).label()
    }
}

impl<T: Label + ?Sized> Label for &T {
    fn label(&self) -> String {
        (**self).label()
    }
}

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// The last `CELL` characters of `label`, left-padded with dashes.
fn cell(label: &str) -> String {
    let count = label.chars().count();
    if count >= CELL {
        label.chars().skip(count - CELL).collect()
    } else {
        format!("{}{label}", "-".repeat(CELL - count))
    }
}

/// `Display` adapter drawing one row pair per level, top level first.
pub struct Levels<'a, T, L> {
    set: &'a SkipSet<T, L>,
}

impl<'a, T, L> Levels<'a, T, L> {
    pub fn new(set: &'a SkipSet<T, L>) -> Self {
        Levels { set }
    }
}

impl<T: Label, L> fmt::Display for Levels<'_, T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.set;
        let mut columns = Vec::with_capacity(set.len());
        let mut cursor = set.begin();
        while cursor != set.end() {
            let label = set.get(cursor).map_err(|_| fmt::Error)?.label();
            let height = set.node_levels(cursor).map_err(|_| fmt::Error)?;
            columns.push((cell(&label), height));
            cursor = set.successor(cursor).map_err(|_| fmt::Error)?;
        }

        writeln!(f, "{}", "-".repeat(42))?;
        let mut links = format!("{} elements", set.len());
        for level in (0..set.levels()).rev() {
            writeln!(f, "{links}")?;
            links = String::from("|");
            let mut keys = String::from(" ");
            for (label, height) in &columns {
                if *height > level {
                    keys.push_str(label);
                    links.push_str("     |");
                } else {
                    keys.push_str("------");
                    links.push_str("      ");
                }
            }
            keys.push_str("--");
            writeln!(f, "{keys}")?;
            links.push_str("  |");
        }
        write!(f, "\n\n")
    }
}

/// Render `set` as text. See the module docs for the layout.
pub fn render<T: Label, L>(set: &SkipSet<T, L>) -> String {
    Levels::new(set).to_string()
}
