// -
// Namespace conventions

/// Namespace every application carries implicitly.
pub(crate) const DEFAULT_NAMESPACE: &str = "application";

/// Extension of the flat key/value format; stripped when normalizing names.
pub(crate) const PROPERTIES_SUFFIX: &str = ".properties";

/// Reserved key holding the whole payload of non-flat namespaces.
pub(crate) const CONTENT_KEY: &str = "content";

// -
// Notification tracking

/// Sequence a namespace is tracked with before the remote source has
/// revealed one.
pub(crate) const INITIAL_NOTIFICATION_SEQUENCE: i64 = -1;
