use super::types::User;

/// Case-insensitive substring match on `name`.
#[must_use]
pub fn matches(user: &User, term: &str) -> bool {
    user.name.to_lowercase().contains(&term.to_lowercase())
}

/// Records whose name contains `term`, in their original order. An empty term
/// keeps everything.
#[must_use]
pub fn filter<'a>(collection: &'a [User], term: &str) -> Vec<&'a User> {
    if term.is_empty() {
        return collection.iter().collect();
    }

    let needle = term.to_lowercase();
    collection
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, city: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            status: true,
            avatar: format!("https://example.com/{id}.png"),
        }
    }

    fn sample() -> Vec<User> {
        vec![
            user("1", "Ana", "Lima"),
            user("2", "Bob", "Oslo"),
            user("3", "Joanna", "Porto"),
            user("4", "BOBBY", "Quito"),
            user("5", "Élan", "Nice"),
        ]
    }

    fn ids(users: &[&User]) -> Vec<String> {
        users.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let collection = sample();
        let result = filter(&collection, "");
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn ana_and_bob_scenario() {
        let collection = vec![user("1", "Ana", "Lima"), user("2", "Bob", "Oslo")];
        let result = filter(&collection, "an");
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn match_is_case_insensitive_and_keeps_order() {
        let collection = sample();
        assert_eq!(ids(&filter(&collection, "bob")), vec!["2", "4"]);
        assert_eq!(ids(&filter(&collection, "AN")), vec!["1", "3", "5"]);
        assert_eq!(ids(&filter(&collection, "élan")), vec!["5"]);
    }

    #[test]
    fn no_match_gives_empty() {
        let collection = sample();
        assert!(filter(&collection, "zed").is_empty());
    }

    #[test]
    fn result_is_exactly_the_matching_records() {
        let collection = sample();
        for term in ["", "a", "b", "O", "nn", "x", " "] {
            let result = filter(&collection, term);
            assert!(result.iter().all(|u| matches(u, term)), "term {term:?}");

            let expected = collection.iter().filter(|u| matches(u, term)).count();
            assert_eq!(result.len(), expected, "term {term:?}");
        }
    }

    #[test]
    fn filter_is_idempotent() {
        let collection = sample();
        for term in ["", "a", "bo", "AnN"] {
            let once: Vec<User> = filter(&collection, term).into_iter().cloned().collect();
            let twice: Vec<User> = filter(&once, term).into_iter().cloned().collect();
            assert_eq!(once, twice, "term {term:?}");
        }
    }
}
