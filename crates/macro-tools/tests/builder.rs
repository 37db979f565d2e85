use carom_macro_tools::{Builder, Deref, Fields};

#[derive(Builder, Fields)]
#[r]
struct Tuning {
    #[default = 0.5]
    restitution: f32,
    #[default(0.98)]
    decay: f32,
    #[builder(skip)]
    frame: u32,
    label: String,
}

#[test]
fn builder_uses_declared_defaults() {
    let tuning: Tuning = TuningBuilder::new().into();
    assert_eq!(tuning.restitution(), 0.5);
    assert_eq!(tuning.decay(), 0.98);
    assert_eq!(tuning.frame(), 0);
    assert!(tuning.label().is_empty());
}

#[test]
fn builder_setters_override_defaults() {
    let tuning: Tuning = TuningBuilder::new()
        .restitution(1.0)
        .label("heavy")
        .into();
    assert_eq!(tuning.restitution(), 1.0);
    assert_eq!(tuning.label(), "heavy");
}

#[test]
fn struct_default_matches_builder_default() {
    let tuning = Tuning::default();
    assert_eq!(tuning.decay(), 0.98);
}

#[derive(Deref)]
struct Wrapped {
    #[deref]
    inner: Vec<u8>,
}

#[test]
fn deref_reaches_marked_field() {
    let mut wrapped = Wrapped { inner: vec![1] };
    wrapped.push(2);
    assert_eq!(wrapped.len(), 2);
    assert_eq!(wrapped.inner, vec![1, 2]);
}
