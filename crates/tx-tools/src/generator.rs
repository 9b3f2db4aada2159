//! Bounded random document builder.

use rand::Rng;
use tx_core::bom::is_noncharacter;
use tx_core::WString;
use tx_dom::{Document, ValueId};

#[derive(Debug, Clone, Copy)]
pub struct CharRange {
    pub low: u32,
    pub high: u32,
}

impl CharRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    pub depth: u32,
    pub avg_children: u32,
    pub avg_string_length: u32,
    pub name_char_range: CharRange,
    pub value_char_range: CharRange,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            avg_children: 5,
            avg_string_length: 50,
            name_char_range: CharRange::new(0x21, 0x7E),
            value_char_range: CharRange::new(0x1, 0xFFFF),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarKind {
    Literal,
    Number,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildKind {
    Scalar(ScalarKind),
    Array,
    Object,
}

const SCALAR_KINDS: [ScalarKind; 3] = [ScalarKind::Literal, ScalarKind::Number, ScalarKind::String];

fn random_char(rng: &mut impl Rng, range: CharRange) -> u32 {
    loop {
        let c = rng.gen_range(range.low..=range.high);
        if !is_noncharacter(c) {
            return c;
        }
    }
}

fn random_text(rng: &mut impl Rng, range: CharRange, avg_len: u32) -> WString {
    let low = (avg_len / 2).max(1);
    let high = (avg_len * 3 / 2).max(low);
    let len = rng.gen_range(low..=high);
    let mut units = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let c = random_char(rng, range);
        if let Some((hi, lo)) = tx_core::bom::to_surrogate_pair(c) {
            units.push(hi);
            units.push(lo);
        } else {
            units.push(c as u16);
        }
    }
    WString::from_vec(units)
}

fn random_name(rng: &mut impl Rng, options: &GeneratorOptions) -> WString {
    random_text(rng, options.name_char_range, options.avg_string_length)
}

fn random_scalar(doc: &mut Document, rng: &mut impl Rng, kind: ScalarKind, options: &GeneratorOptions) -> ValueId {
    match kind {
        ScalarKind::Literal => {
            let text = match rng.gen_range(0..3) {
                0 => WString::from_str("false"),
                1 => WString::from_str("true"),
                _ => WString::from_str("null"),
            };
            doc.create_literal(&text).expect("one of false/true/null")
        }
        ScalarKind::Number => {
            if rng.gen_bool(0.5) {
                doc.create_number_from_i64(rng.gen_range(-1_000_000..=1_000_000))
            } else {
                doc.create_number_from_f64(rng.gen_range(-1_000.0..=1_000.0))
            }
        }
        ScalarKind::String => {
            let text = random_text(rng, options.value_char_range, options.avg_string_length);
            doc.create_string(&text)
        }
    }
}

/// Builds a random document honouring `options`, attaching it as `doc`'s root.
pub fn generate(doc: &mut Document, rng: &mut impl Rng, options: &GeneratorOptions) {
    let root = build(doc, rng, options, options.depth);
    doc.set_root(root).expect("freshly built value has no parent yet");
}

fn build(doc: &mut Document, rng: &mut impl Rng, options: &GeneratorOptions, levels_remaining: u32) -> ValueId {
    if levels_remaining <= 1 {
        let kind = SCALAR_KINDS[rng.gen_range(0..SCALAR_KINDS.len())];
        return random_scalar(doc, rng, kind, options);
    }

    let as_object = rng.gen_bool(0.5);
    let container = if as_object { doc.create_object() } else { doc.create_array() };

    let child_count = rng.gen_range(1..=(2 * options.avg_children)).max(1) as usize;
    let next_levels = levels_remaining - 1;
    let at_last_level = next_levels <= 1;

    let mut saw_container = false;
    for i in 0..child_count {
        let force_container = !at_last_level && !saw_container && i == child_count - 1;
        let kind = if at_last_level {
            ChildKind::Scalar(SCALAR_KINDS[rng.gen_range(0..SCALAR_KINDS.len())])
        } else if force_container {
            if rng.gen_bool(0.5) { ChildKind::Array } else { ChildKind::Object }
        } else {
            match rng.gen_range(0..5) {
                0 => ChildKind::Array,
                1 => ChildKind::Object,
                n => ChildKind::Scalar(SCALAR_KINDS[n - 2]),
            }
        };

        if matches!(kind, ChildKind::Array | ChildKind::Object) {
            saw_container = true;
        }

        let child = match kind {
            ChildKind::Scalar(s) => random_scalar(doc, rng, s, options),
            ChildKind::Array | ChildKind::Object => build(doc, rng, options, next_levels),
        };

        if as_object {
            let name = loop {
                let candidate = random_name(rng, options);
                if !doc.contains_member(container, &candidate).unwrap_or(false) {
                    break candidate;
                }
            };
            doc.append_member(container, &name, child).expect("fresh name, fresh value");
        } else {
            doc.append_item(container, child).expect("fresh value, matching container kind");
        }
    }

    container
}
