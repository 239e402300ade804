use itertools::Itertools;

/// Formats subgraph names as `subgraph "a"` or `subgraphs "a", "b"`.
pub(crate) fn human_readable_subgraph_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> String {
    let names = names.into_iter().collect_vec();
    let plural = if names.len() > 1 { "s" } else { "" };
    format!(
        "subgraph{plural} {}",
        names.iter().map(|name| format!("\"{name}\"")).join(", ")
    )
}

/// Joins descriptions of conflicting groups into `<first> but <second> and <third>`.
///
/// A single group is returned as is.
pub(crate) fn join_mismatched_groups(groups: &[String]) -> String {
    match groups {
        [] => String::new(),
        [only] => only.clone(),
        [first, second, rest @ ..] => {
            let mut sentence = format!("{first} but {second}");
            if !rest.is_empty() {
                sentence.push_str(" and ");
                sentence.push_str(&rest.join(" and "));
            }
            sentence
        }
    }
}
