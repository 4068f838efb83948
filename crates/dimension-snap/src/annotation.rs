use crate::error::SnapError;
use crate::format::DimensionFormatter;
use crate::toggle::{next_arrow_state, next_extension_line_state, PairState};
use log::debug;
use serde::{Deserialize, Serialize};

const STAR: char = '*';

/// Arrow type code for a plain arrowhead.
pub const ARROW_STANDARD: u8 = 2;
/// Arrow type code used for the alternate end style.
pub const ARROW_ALTERNATE: u8 = 5;

/// Sign printed in front of the dimension value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionSign {
    #[default]
    Nothing,
    Diameter,
    Square,
    Radius,
    MetricThread,
}

impl DimensionSign {
    /// Host sign code, 0 (none) through 4 (metric thread).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DimensionSign::Nothing),
            1 => Some(DimensionSign::Diameter),
            2 => Some(DimensionSign::Square),
            3 => Some(DimensionSign::Radius),
            4 => Some(DimensionSign::MetricThread),
            _ => None,
        }
    }

    /// Prefix drawn before the value text.
    pub fn symbol(self) -> &'static str {
        match self {
            DimensionSign::Nothing => "",
            DimensionSign::Diameter => "\u{2300}",
            DimensionSign::Square => "\u{25a1}",
            DimensionSign::Radius => "R",
            DimensionSign::MetricThread => "M",
        }
    }
}

/// What the batch operations need from a host dimension object.
///
/// The drawing's object model lives in the host application and is reached
/// only through this trait. Toggles read the current state from the first
/// selected annotation and write the next state to all of them, so a mixed
/// selection ends up uniform after one toggle.
pub trait DimensionAnnotation {
    fn nominal_value(&self) -> f64;
    fn is_angle(&self) -> bool;

    /// True while the host shows its own measured value.
    fn is_auto_nominal(&self) -> bool;
    fn set_auto_nominal(&mut self, auto: bool);
    fn set_nominal_text(&mut self, text: &str);

    fn suffix(&self) -> &str;
    fn set_suffix(&mut self, suffix: String);

    fn set_sign(&mut self, sign: DimensionSign);

    fn extension_lines(&self) -> (bool, bool);
    fn set_extension_lines(&mut self, first: bool, second: bool);

    fn arrow_types(&self) -> (u8, u8);
    fn set_arrow_types(&mut self, first: u8, second: u8);

    /// Commit pending changes to the host. Called once per touched annotation.
    fn update(&mut self) {}
}

/// Write rounded text into every annotation and switch it to manual text.
///
/// All texts are computed before anything is written, so an invalid value
/// leaves the whole selection untouched.
pub fn round_selection<A: DimensionAnnotation>(
    dims: &mut [A],
    formatter: &DimensionFormatter,
) -> Result<(), SnapError> {
    let texts = dims
        .iter()
        .map(|d| formatter.format(d.nominal_value(), d.is_angle()))
        .collect::<Result<Vec<_>, _>>()?;

    for (d, text) in dims.iter_mut().zip(texts) {
        debug!("rounding {} -> {text}", d.nominal_value());
        d.set_auto_nominal(false);
        d.set_nominal_text(&text);
        d.update();
    }
    Ok(())
}

/// Give every annotation back its measured value.
pub fn remove_rounding<A: DimensionAnnotation>(dims: &mut [A]) {
    for d in dims.iter_mut() {
        d.set_auto_nominal(true);
        d.update();
    }
}

/// Indices of annotations carrying manually entered (rounded) text.
pub fn select_rounded<A: DimensionAnnotation>(dims: &[A]) -> Vec<usize> {
    dims.iter()
        .enumerate()
        .filter(|(_, d)| !d.is_auto_nominal())
        .map(|(i, _)| i)
        .collect()
}

/// Add or remove the trailing tolerance star, decided by the first annotation.
pub fn toggle_star<A: DimensionAnnotation>(dims: &mut [A]) {
    let Some(first) = dims.first() else {
        return;
    };

    if first.suffix().ends_with(STAR) {
        for d in dims.iter_mut() {
            if let Some(pos) = d.suffix().find(STAR) {
                let kept = d.suffix()[..pos].to_string();
                d.set_suffix(kept);
                d.update();
            }
        }
    } else {
        for d in dims.iter_mut() {
            if !d.suffix().ends_with(STAR) {
                let starred = format!("{}{STAR}", d.suffix());
                d.set_suffix(starred);
                d.update();
            }
        }
    }
}

pub fn set_sign<A: DimensionAnnotation>(dims: &mut [A], sign: DimensionSign) {
    for d in dims.iter_mut() {
        d.set_sign(sign);
        d.update();
    }
}

/// Advance extension-line visibility: both, first, second, none, both...
pub fn switch_extension_lines<A: DimensionAnnotation>(dims: &mut [A]) {
    let Some(first) = dims.first() else {
        return;
    };
    let (one, two) = first.extension_lines();
    let next = next_extension_line_state(PairState::from_flags(one, two));

    let (one, two) = next.flags();
    for d in dims.iter_mut() {
        d.set_extension_lines(one, two);
        d.update();
    }
}

/// Advance arrow ends through the standard/alternate combinations.
pub fn switch_arrows<A: DimensionAnnotation>(dims: &mut [A]) {
    let Some(first) = dims.first() else {
        return;
    };
    let (one, two) = first.arrow_types();
    let current = PairState::from_flags(one != ARROW_STANDARD, two != ARROW_STANDARD);
    let next = next_arrow_state(current);

    let code = |alternate: bool| if alternate { ARROW_ALTERNATE } else { ARROW_STANDARD };
    let (one, two) = next.flags();
    for d in dims.iter_mut() {
        d.set_arrow_types(code(one), code(two));
        d.update();
    }
}

/// Plain in-memory dimension, for callers without a host object model.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub nominal_value: f64,
    pub is_angle: bool,
    pub auto_nominal: bool,
    pub nominal_text: String,
    pub suffix: String,
    pub sign: DimensionSign,
    pub extension_lines: (bool, bool),
    pub arrow_types: (u8, u8),
    /// Number of committed updates.
    pub revision: u32,
}

impl Dimension {
    pub fn length(nominal_value: f64) -> Self {
        Self {
            nominal_value,
            is_angle: false,
            auto_nominal: true,
            nominal_text: String::new(),
            suffix: String::new(),
            sign: DimensionSign::Nothing,
            extension_lines: (true, true),
            arrow_types: (ARROW_STANDARD, ARROW_STANDARD),
            revision: 0,
        }
    }

    pub fn angle(nominal_value: f64) -> Self {
        Self {
            is_angle: true,
            ..Self::length(nominal_value)
        }
    }
}

impl DimensionAnnotation for Dimension {
    fn nominal_value(&self) -> f64 {
        self.nominal_value
    }

    fn is_angle(&self) -> bool {
        self.is_angle
    }

    fn is_auto_nominal(&self) -> bool {
        self.auto_nominal
    }

    fn set_auto_nominal(&mut self, auto: bool) {
        self.auto_nominal = auto;
    }

    fn set_nominal_text(&mut self, text: &str) {
        self.nominal_text = text.to_string();
    }

    fn suffix(&self) -> &str {
        &self.suffix
    }

    fn set_suffix(&mut self, suffix: String) {
        self.suffix = suffix;
    }

    fn set_sign(&mut self, sign: DimensionSign) {
        self.sign = sign;
    }

    fn extension_lines(&self) -> (bool, bool) {
        self.extension_lines
    }

    fn set_extension_lines(&mut self, first: bool, second: bool) {
        self.extension_lines = (first, second);
    }

    fn arrow_types(&self) -> (u8, u8) {
        self.arrow_types
    }

    fn set_arrow_types(&mut self, first: u8, second: u8) {
        self.arrow_types = (first, second);
    }

    fn update(&mut self) {
        self.revision += 1;
    }
}
