//! Search box filter.

use super::normalize::fold_for_search;
use crate::models::Member;

/// Positions of the members whose search text contains `query`, in dataset order.
///
/// A query that folds to the empty string matches everything.
pub fn matching_positions(members: &[Member], query: &str) -> Vec<usize> {
    let needle = fold_for_search(query);
    if needle.is_empty() {
        return (0..members.len()).collect();
    }

    members
        .iter()
        .enumerate()
        .filter(|(_, member)| member.search_text().contains(&needle))
        .map(|(position, _)| position)
        .collect()
}

/// Members matching `query`, in dataset order.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    matching_positions(members, query)
        .into_iter()
        .map(|position| &members[position])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::member;

    fn roster() -> Vec<Member> {
        vec![
            member("@ana", 3, "Ana Silva", "Regularizado"),
            member("@joao", 1, "João Barbosa", "Atraso"),
            member("@rita", 2, "Rita Antunes", "Notificado"),
            member("@joana", 4, "Joana Sá", "Regularizado"),
        ]
    }

    fn usernames(found: &[&Member]) -> Vec<String> {
        found.iter().map(|m| m.username.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let members = roster();
        assert_eq!(
            usernames(&filter_members(&members, "")),
            vec!["@ana", "@joao", "@rita", "@joana"]
        );
        assert_eq!(filter_members(&members, "   \t").len(), 4);
    }

    #[test]
    fn test_accent_and_case_insensitive() {
        let members = roster();
        assert_eq!(usernames(&filter_members(&members, "joao")), vec!["@joao"]);
        assert_eq!(usernames(&filter_members(&members, "JOÃO")), vec!["@joao"]);
        assert_eq!(usernames(&filter_members(&members, "  joana sá ")), vec!["@joana"]);
    }

    #[test]
    fn test_result_is_an_ordered_subsequence() {
        let members = roster();
        let positions = matching_positions(&members, "regularizado");
        assert_eq!(positions, vec![0, 3]);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_matches_nested_tag_names() {
        let members = roster();
        assert_eq!(filter_members(&members, "socio").len(), 4);
        assert!(filter_members(&members, "inexistente").is_empty());
    }
}
