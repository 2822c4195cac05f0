use larix_macro_tools::{Builder, Deref, Fields};

#[derive(Debug, Fields, Builder)]
#[r]
struct Context {
    #[default = 32]
    segment_count: usize,
    #[default = 1e-5]
    epsilon: f32,
    name: String,
    #[builder(skip)]
    #[default(vec![0.; 4])]
    cache: Vec<f32>,
}

impl ContextBuilder {
    fn cache_size(mut self, size: usize) -> Self {
        self.cache = vec![0.; size];
        self
    }
}

#[test]
fn test_default_values() {
    let context = Context::default();
    assert_eq!(context.segment_count(), 32);
    assert_eq!(context.epsilon(), 1e-5);
    assert_eq!(context.name(), "");
    assert_eq!(context.cache().len(), 4);
}

#[test]
fn test_builder_setters() {
    let context: Context = ContextBuilder::new()
        .segment_count(8usize)
        .name("scene")
        .cache_size(2)
        .into();
    assert_eq!(context.segment_count(), 8);
    assert_eq!(context.epsilon(), 1e-5);
    assert_eq!(context.name(), "scene");
    assert_eq!(context.cache().len(), 2);

    let context = ContextBuilder::default().epsilon(0.5).build();
    assert_eq!(context.epsilon(), 0.5);
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Support {
    distance: f32,
}

impl Support {
    fn is_valid(&self) -> bool {
        self.distance.is_finite()
    }
}

#[derive(Deref)]
struct Combined {
    #[deref]
    support: Support,
    is_sum: bool,
}

#[test]
fn test_deref() {
    let mut combined = Combined {
        support: Support { distance: 1. },
        is_sum: false,
    };
    assert!(combined.is_valid());
    assert!(!combined.is_sum);

    combined.distance = f32::NAN;
    assert!(!combined.is_valid());
    assert!(combined.support.distance.is_nan());
}
