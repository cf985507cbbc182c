use std::collections::HashMap;

/// Attribute names tried in order when resolving which region a path belongs
/// to. The first present, non-empty attribute wins.
pub const REGION_ID_ATTRIBUTES: [&str; 4] = ["class", "name", "data-name", "id"];

/// Resolve an element's region identifier with first-match-wins semantics over
/// the candidate attribute list. Empty attribute values count as absent.
/// Elements resolving to `None` are left out of the index and stay inert.
pub fn resolve_region_id<F>(mut attribute: F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    REGION_ID_ATTRIBUTES
        .iter()
        .find_map(|name| attribute(name).filter(|value| !value.is_empty()))
}

/// Region identifier → the ordered set of element handles drawn for it.
///
/// A region may be split across several disjoint shapes sharing one
/// identifier. Identifiers that collide across attribute kinds (a `class`
/// value equal to another element's `id`) merge silently into one region.
#[derive(Debug, Clone)]
pub struct RegionIndex<H> {
    order: Vec<String>,
    groups: HashMap<String, Vec<H>>,
}

impl<H> RegionIndex<H> {
    /// Group handles by resolved identifier, preserving encounter order both
    /// across regions and within each region's handle list.
    pub fn build<I, F>(elements: I, mut resolve: F) -> Self
    where
        I: IntoIterator<Item = H>,
        F: FnMut(&H) -> Option<String>,
    {
        let mut order = Vec::new();
        let mut groups: HashMap<String, Vec<H>> = HashMap::new();

        for element in elements {
            let Some(id) = resolve(&element) else {
                continue;
            };
            let group = groups.entry(id.clone()).or_default();
            if group.is_empty() {
                order.push(id);
            }
            group.push(element);
        }

        Self { order, groups }
    }

    /// Regions in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[H])> {
        self.order
            .iter()
            .map(|id| (id.as_str(), self.groups[id].as_slice()))
    }

    /// Every indexed handle of every region, in encounter order.
    pub fn all_elements(&self) -> impl Iterator<Item = &H> {
        self.iter().flat_map(|(_, group)| group.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::{RegionIndex, resolve_region_id};
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(map: &HashMap<String, String>) -> Option<String> {
        resolve_region_id(|name| map.get(name).cloned())
    }

    fn group<'a, H>(index: &'a RegionIndex<H>, id: &str) -> &'a [H] {
        index
            .iter()
            .find(|(region, _)| *region == id)
            .map(|(_, group)| group)
            .unwrap_or(&[])
    }

    #[test]
    fn class_wins_over_every_other_attribute() {
        let map = attrs(&[
            ("class", "Xland"),
            ("name", "Yland"),
            ("data-name", "Zland"),
            ("id", "Wland"),
        ]);
        assert_eq!(resolve(&map), Some("Xland".to_string()));
    }

    #[test]
    fn priority_falls_through_in_order() {
        let map = attrs(&[("data-name", "Zland"), ("id", "Wland")]);
        assert_eq!(resolve(&map), Some("Zland".to_string()));

        let map = attrs(&[("id", "Wland")]);
        assert_eq!(resolve(&map), Some("Wland".to_string()));
    }

    #[test]
    fn empty_attribute_values_count_as_absent() {
        let map = attrs(&[("class", ""), ("name", "Yland")]);
        assert_eq!(resolve(&map), Some("Yland".to_string()));
    }

    #[test]
    fn element_without_candidates_resolves_to_none() {
        let map = attrs(&[("d", "M0 0 L1 1"), ("fill", "#fff")]);
        assert_eq!(resolve(&map), None);
    }

    #[test]
    fn build_groups_disjoint_shapes_under_one_identifier() {
        let elements = vec![
            ("p0", Some("Xland")),
            ("p1", Some("Yland")),
            ("p2", Some("Xland")),
            ("p3", None),
            ("p4", Some("Xland")),
        ];
        let index = RegionIndex::build(elements, |&(_, id)| id.map(str::to_string));

        assert_eq!(index.iter().count(), 2);
        let xland: Vec<&str> = group(&index, "Xland").iter().map(|e| e.0).collect();
        assert_eq!(xland, vec!["p0", "p2", "p4"]);
    }

    #[test]
    fn unresolvable_elements_are_excluded() {
        let elements: Vec<(&str, Option<&str>)> = vec![("p0", None), ("p1", None)];
        let index = RegionIndex::build(elements, |&(_, id)| id.map(str::to_string));
        assert_eq!(index.iter().count(), 0);
        assert_eq!(index.all_elements().count(), 0);
    }

    #[test]
    fn cross_attribute_collision_merges_silently() {
        // One path carries class="Xland", another only id="Xland". Both land
        // in the same region.
        let a = attrs(&[("class", "Xland")]);
        let b = attrs(&[("id", "Xland")]);
        let index = RegionIndex::build(vec![("a", a), ("b", b)], |(_, map)| resolve(map));

        assert_eq!(index.iter().count(), 1);
        let merged: Vec<&str> = group(&index, "Xland").iter().map(|e| e.0).collect();
        assert_eq!(merged, vec!["a", "b"]);
    }

    #[test]
    fn iteration_preserves_encounter_order() {
        let elements = vec![
            ("p0", Some("Cland")),
            ("p1", Some("Aland")),
            ("p2", Some("Bland")),
            ("p3", Some("Aland")),
        ];
        let index = RegionIndex::build(elements, |&(_, id)| id.map(str::to_string));

        let ids: Vec<&str> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["Cland", "Aland", "Bland"]);

        let all: Vec<&str> = index.all_elements().map(|e| e.0).collect();
        assert_eq!(all, vec!["p0", "p1", "p3", "p2"]);
    }
}
