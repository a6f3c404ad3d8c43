use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kc_tree::Tree;

use crate::derive::{Persist, PersistEnum};
use crate::math::{Rect, Vec2};
use crate::{
    Codec, CodecRegistry, ConvertError, Persist as _, PersistHook, TreeExt, Value, deserialize,
    members_of, serialize,
};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(PersistEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Launch,
    Flight,
    Landed,
}

#[derive(Persist, Clone, Debug, PartialEq)]
#[persist(name = "KCoopTimer")]
#[persist(property(name = "minutes", get = Self::minutes, set = Self::set_minutes, section = "Derived"))]
struct Timer {
    name: String,
    #[persist(comment = "seconds")]
    elapsed: f64,
    paused: bool,
    mode: Mode,
    #[persist(section = "Window")]
    window: Rect,
    #[persist(section = "Window")]
    anchor: Vec2,
    inner: Tree,
    #[persist(skip)]
    ticks: u64,
}

impl Timer {
    fn minutes(&self) -> f64 {
        self.elapsed / 60.0
    }

    fn set_minutes(&mut self, _minutes: f64) {
        // `elapsed` is the source of truth.
    }

    fn sample() -> Self {
        let mut inner = Tree::new("Inner");
        inner.add_value("a", "1");
        inner.add_value("b", "2");
        Self {
            name: "launch".into(),
            elapsed: 90.0,
            paused: false,
            mode: Mode::Flight,
            window: Rect::new(10.0, 20.0, 300.0, 150.0),
            anchor: Vec2::new(0.5, 1.0),
            inner,
            ticks: 99,
        }
    }

    fn blank() -> Self {
        Self {
            name: String::new(),
            elapsed: 0.0,
            paused: true,
            mode: Mode::Launch,
            window: Rect::default(),
            anchor: Vec2::ZERO,
            inner: Tree::default(),
            ticks: 0,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn members_in_declaration_order() {
    let members = members_of(&Timer::sample()).unwrap();
    let names: Vec<_> = members.iter().map(|m| m.name()).collect();
    assert_eq!(
        names,
        ["name", "elapsed", "paused", "mode", "window", "anchor", "inner", "minutes"]
    );
    assert!(members.iter().all(|m| m.name() != "ticks"));
    assert!(members[6].is_tree());
}

#[test]
fn layout_of_serialized_timer() {
    let tree = serialize(&Timer::sample(), &CodecRegistry::new()).unwrap();
    let text = format!("{tree}");

    let expected = "\
KCoopTimer
{
\tname = launch
\t// elapsed = seconds
\telapsed = 90
\tpaused = False
\tmode = Flight
\tWindow
\t{
\t\twindow = 10,20,300,150
\t\tanchor = 0.5,1
\t}
\tinner
\t{
\t\tInner
\t\t{
\t\t\ta = 1
\t\t\tb = 2
\t\t}
\t}
\tDerived
\t{
\t\tminutes = 1.5
\t}
}
";
    assert_eq!(text, expected);
}

#[test]
fn round_trip_restores_eligible_members() {
    let codecs = CodecRegistry::new();
    let original = Timer::sample();
    let tree = serialize(&original, &codecs).unwrap();

    let mut restored = Timer::blank();
    assert!(deserialize(&tree, &mut restored, &codecs));

    assert_eq!(restored.name, original.name);
    assert_eq!(restored.elapsed, original.elapsed);
    assert_eq!(restored.paused, original.paused);
    assert_eq!(restored.mode, Mode::Flight);
    assert_eq!(restored.window, original.window);
    assert_eq!(restored.anchor, original.anchor);
    assert_eq!(restored.inner, original.inner);
    // Excluded, so untouched.
    assert_eq!(restored.ticks, 0);
}

#[test]
fn nested_tree_is_a_copy() {
    let codecs = CodecRegistry::new();
    let mut timer = Timer::sample();
    let tree = serialize(&timer, &codecs).unwrap();

    timer.inner.set_value("a", "changed");
    let stored = tree.get_node("inner").unwrap().get_node("Inner").unwrap();
    assert_eq!(stored.get_value("a"), Some("1"));
}

#[test]
fn enum_case_is_case_insensitive() {
    let codecs = CodecRegistry::new();
    let mut tree = serialize(&Timer::sample(), &codecs).unwrap();
    tree.set_value("mode", "LANDED");

    let mut restored = Timer::blank();
    assert!(deserialize(&tree, &mut restored, &codecs));
    assert_eq!(restored.mode, Mode::Landed);
}

#[test]
fn no_codec_for_display_only_value() {
    let mut codecs = CodecRegistry::new();
    codecs.remove::<Vec2>();

    let tree = serialize(&Timer::sample(), &codecs).unwrap();
    let window = tree.get_node("Window").unwrap();
    assert_eq!(window.get_value("anchor"), Some("(0.5, 1.0)"));

    // Written, but no parse contract to read it back.
    let mut restored = Timer::blank();
    assert!(!deserialize(&tree, &mut restored, &codecs));
    assert_eq!(restored.anchor, Vec2::ZERO);
    assert_eq!(restored.window, Timer::sample().window);
}

// -----------------------------------------------------------------------------
// Inheritance

#[derive(Persist, Default, Debug)]
#[persist(hook)]
struct Craft {
    id: u32,
    #[persist(skip)]
    loaded: bool,
}

impl PersistHook for Craft {
    fn on_serialize(&self, tree: &mut Tree) {
        tree.store("schema", &2u8);
    }

    fn on_deserialize(&mut self, tree: &Tree) {
        self.loaded = tree.parse_or("schema", 0u8) == 2;
    }
}

#[derive(Persist, Default, Debug)]
#[persist(hook)]
struct Rover {
    #[persist(flatten)]
    craft: Craft,
    #[persist(rename = "wheelCount")]
    wheels: u8,
    #[persist(skip)]
    order: Vec<&'static str>,
}

impl PersistHook for Rover {
    fn on_serialize(&self, tree: &mut Tree) {
        // The base hook has already run.
        let schema = String::from(tree.read_string("schema", "?"));
        tree.store("base_schema_seen", &schema);
    }

    fn on_deserialize(&mut self, _tree: &Tree) {
        self.order.push("rover");
    }
}

#[test]
fn flattened_base_members_and_hooks() {
    let codecs = CodecRegistry::new();
    let rover = Rover {
        craft: Craft { id: 7, loaded: false },
        wheels: 6,
        order: Vec::new(),
    };

    let schema = Rover::schema().unwrap();
    let names: Vec<_> = schema.members().map(|m| m.name()).collect();
    assert_eq!(names, ["id", "wheelCount"]);

    let tree = serialize(&rover, &codecs).unwrap();
    assert_eq!(tree.name(), "Rover");
    assert_eq!(tree.get_value("id"), Some("7"));
    assert_eq!(tree.get_value("wheelCount"), Some("6"));
    assert_eq!(tree.get_value("base_schema_seen"), Some("2"));

    let mut restored = Rover::default();
    assert!(deserialize(&tree, &mut restored, &codecs));
    assert_eq!(restored.craft.id, 7);
    assert_eq!(restored.wheels, 6);
    assert!(restored.craft.loaded);
    assert_eq!(restored.order, ["rover"]);
}

// -----------------------------------------------------------------------------
// Codecs

#[derive(Debug, Clone, PartialEq)]
struct Stage {
    index: u8,
    // Not stored, kept from the current value.
    fired: bool,
}

impl Value for Stage {
    fn to_text(&self) -> String {
        format!("{}", self.index)
    }
}

struct StageCodec;

impl Codec<Stage> for StageCodec {
    fn serialize(&self, value: &Stage) -> String {
        format!("S{}", value.index)
    }

    fn deserialize(&self, existing: Stage, text: &str) -> Result<Stage, ConvertError> {
        let index = text
            .trim_start_matches('S')
            .parse()
            .map_err(|err| ConvertError::invalid::<Stage>(text, err))?;
        Ok(Stage { index, ..existing })
    }
}

#[derive(Persist, Debug)]
struct Sequence {
    current: Stage,
}

#[test]
fn codec_receives_existing_value() {
    let mut codecs = CodecRegistry::new();
    codecs.register::<Stage>(StageCodec);

    let sequence = Sequence {
        current: Stage { index: 3, fired: false },
    };
    let tree = serialize(&sequence, &codecs).unwrap();
    assert_eq!(tree.get_value("current"), Some("S3"));

    let mut restored = Sequence {
        current: Stage { index: 0, fired: true },
    };
    assert!(deserialize(&tree, &mut restored, &codecs));
    assert_eq!(restored.current, Stage { index: 3, fired: true });
}

#[cfg(feature = "auto_register")]
mod auto_register {
    use alloc::string::String;

    use super::Stage;
    use crate::{CodecRegistry, ConvertError};

    fn write(stage: &Stage) -> String {
        alloc::format!("#{}", stage.index)
    }

    fn read(existing: Stage, text: &str) -> Result<Stage, ConvertError> {
        let index = text
            .trim_start_matches('#')
            .parse()
            .map_err(|err| ConvertError::invalid::<Stage>(text, err))?;
        Ok(Stage { index, ..existing })
    }

    crate::submit_codec!(Stage => crate::codec::FnCodec::new(write, read));

    #[test]
    fn submitted_codecs_are_collected() {
        let mut codecs = CodecRegistry::empty();
        if codecs.auto_register() {
            assert!(codecs.contains::<Stage>());
            let stage = Stage { index: 4, fired: false };
            assert_eq!(codecs.serialize_value(&stage), "#4");
        }
    }
}
