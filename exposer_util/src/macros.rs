#[macro_export]
macro_rules! opt {
    (, $default:tt) => {
        $default
    };
    ($optional:expr, $default:tt) => {
        $optional
    };
}

#[macro_export]
macro_rules! param_key {
    ($name:ident) => {
        stringify!($name).to_string()
    };
    ($name:literal) => {
        $name.to_string()
    };
}

#[macro_export]
macro_rules! params_internal {
    ($vec:ident, required, $key:expr, $val:expr) => {
        $vec.push(($key, $val.to_string()));
    };
    ($vec:ident, optional, $key:expr, $val:expr) => {
        if let Some(ref v) = $val {
            $vec.push(($key, v.to_string()));
        }
    };
    ($vec:ident, nonempty, $key:expr, $val:expr) => {
        if !$val.is_empty() {
            $vec.push(($key, $val.to_string()));
        }
    };
    ($vec:ident, flag, $key:expr, $val:expr) => {
        if $val {
            $vec.push(($key, "true".to_string()));
        }
    };
}

/// Builds the ordered `(key, value)` list of query parameters for an upstream endpoint.
/// Keys are either identifiers or string literals (for bracketed keys like `search[name]`).
/// A literal key always needs an explicit `=> value`.
///
/// Kinds:
/// - `required`: always sent.
/// - `optional`: sent when the `Option` is `Some`.
/// - `nonempty`: sent when the string is not empty.
/// - `flag`: sent as `true` when the bool is set, omitted otherwise.
///
/// ```
/// use exposer_util::build_params;
///
/// let page = 2;
/// let order = "";
/// let params = build_params! {
///     required page,
///     required "search[name]" => "blue_sky",
///     nonempty order,
///     flag random => true,
/// };
/// assert_eq!(
///     params,
///     vec![
///         ("page".to_string(), "2".to_string()),
///         ("search[name]".to_string(), "blue_sky".to_string()),
///         ("random".to_string(), "true".to_string()),
///     ]
/// );
/// ```
#[macro_export]
macro_rules! build_params {
    (
        $(
            $kind:ident $name:tt $( => $val:expr )?
        ),+ $(,)?
    ) => {
        {
            let mut params: Vec<(String, String)> = Vec::new();
            $(
                $crate::params_internal!(
                    params,
                    $kind,
                    $crate::param_key!($name),
                    $crate::opt!($( $val )?, $name)
                );
            )+
            params
        }
    };
}
