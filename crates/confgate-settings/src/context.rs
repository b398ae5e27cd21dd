use confgate_domain::EvalContext;

/// Assemble the evaluation context of one run.
///
/// `vars` is the process environment (or a test stand-in) as `(name, value)` pairs;
/// later duplicates win.
pub fn eval_context<I, K, V>(vars: I, version: &str, commit: Option<&str>) -> EvalContext
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    EvalContext {
        env: vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
        version: version.to_string(),
        commit: commit.map(str::to_string),
    }
}
