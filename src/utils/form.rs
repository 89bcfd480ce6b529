//! Url-encoded form values for the HTML form dialect.

/// Rails checkbox encoding of a boolean.
pub fn bool_as_form_value(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Ordered `application/x-www-form-urlencoded` key/value pairs.
///
/// ```rust
/// use opsman::utils::FormValues;
///
/// let mut form = FormValues::new();
/// form.set("_method", "put");
/// form.add("iaas_configuration[vpc_id]", "vpc 1");
/// assert_eq!(form.encode(), "_method=put&iaas_configuration%5Bvpc_id%5D=vpc+1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value.into()));
        self
    }

    /// Append a value for `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encode the pairs in insertion order.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}
