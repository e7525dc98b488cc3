use crate::data::DataSlot;
use crate::path::AbsolutePath;

/// Deep-clones `data` and drops every top-level key that none of `paths`
/// reads.
///
/// A key survives when some path anchored at the element's index has a
/// relative part whose first segment is that key. Matching is per segment,
/// not per character: `customer.name` keeps `customer` but not
/// `customerName`. A bare `%n%` anchor keeps its element whole, and the
/// empty path list (match-all) keeps everything.
pub fn prune_paths(paths: &[String], data: &[DataSlot]) -> Vec<DataSlot> {
    if paths.is_empty() {
        return data.to_vec();
    }

    let anchored: Vec<AbsolutePath> = paths
        .iter()
        .filter_map(|path| AbsolutePath::parse(path).ok())
        .collect();

    data.iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.as_ref().map(|object| {
                let mut copy = object.clone_object();
                let heads: Vec<&str> = anchored
                    .iter()
                    .filter_map(AbsolutePath::indexed)
                    .filter(|(at, _)| *at == index)
                    .map(|(_, relative)| relative.split('.').next().unwrap_or(relative))
                    .collect();
                if heads.iter().any(|head| head.is_empty()) {
                    return copy;
                }
                for key in copy.keys() {
                    if !heads.contains(&key.as_str()) {
                        copy.remove_key(&key);
                    }
                }
                copy
            })
        })
        .collect()
}
