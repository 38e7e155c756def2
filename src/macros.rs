/// Builds a [`Value`](crate::Value) tree from a literal.
///
/// - `null` is an empty value
/// - `[...]` is a sequence and `{...}` a mapping with string-literal keys
/// - anything else becomes a scalar holding its `to_string()` text
///
/// Mapping entries are named after their keys, as in a parsed document.
///
/// ```rust
/// use tops::{parse_document, tops};
///
/// let value = tops!({
///     "host": "localhost",
///     "port": 8080,
///     "tags": ["a", "b"],
///     "extra": null
/// });
///
/// let text = "host: localhost\nport: 8080\ntags:\n  - a\n  - b\nextra:\n";
/// assert_eq!(value, parse_document(text).unwrap());
/// ```
#[macro_export]
macro_rules! tops {
    // Handle null
    (null) => {
        $crate::Value::new()
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::from(::std::vec::Vec::<$crate::Value>::new())
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::from(vec![$($crate::tops!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::from($crate::Mapping::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::tops!($value).with_name($key));
        )*
        $crate::Value::from(mapping)
    }};

    // Scalars
    ($s:expr) => {
        $crate::Value::from($s.to_string())
    };
}
