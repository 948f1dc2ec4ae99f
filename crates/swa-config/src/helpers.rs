use indexmap::IndexMap;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_empty_map<K, V>(map: &IndexMap<K, V>) -> bool {
    map.is_empty()
}
