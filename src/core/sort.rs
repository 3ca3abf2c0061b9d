use crate::domain::model::{SanitizedEmployee, SortPolicy};
use feruca::Collator;
use std::cmp::Ordering;

/// Sorts in place with Unicode collation (`É` sorts next to `E`, not after `Z`).
/// `sort_by` is stable, so equal keys keep their input order.
pub fn sort(records: &mut [SanitizedEmployee], policy: SortPolicy) {
    let mut collator = Collator::default();
    records.sort_by(|a, b| compare(&mut collator, a, b, policy));
}

pub fn compare(
    collator: &mut Collator,
    a: &SanitizedEmployee,
    b: &SanitizedEmployee,
    policy: SortPolicy,
) -> Ordering {
    match policy {
        SortPolicy::LastName => compare_ignore_case(collator, &a.lastname, &b.lastname)
            .then_with(|| compare_ignore_case(collator, &a.firstname, &b.firstname)),
        SortPolicy::FirstName => compare_ignore_case(collator, &a.firstname, &b.firstname),
    }
}

// 先轉小寫，讓大小寫不同的名字視為相同鍵值
fn compare_ignore_case(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    collator.collate(a.as_str(), b.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(firstname: &str, lastname: &str) -> SanitizedEmployee {
        SanitizedEmployee {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            ..Default::default()
        }
    }

    fn names(records: &[SanitizedEmployee]) -> Vec<(&str, &str)> {
        records
            .iter()
            .map(|r| (r.firstname.as_str(), r.lastname.as_str()))
            .collect()
    }

    #[test]
    fn test_last_name_then_first_name_ignores_case() {
        let mut records = vec![employee("Zoe", "Doe"), employee("amy", "doe")];
        sort(&mut records, SortPolicy::LastName);

        assert_eq!(names(&records), vec![("amy", "doe"), ("Zoe", "Doe")]);
    }

    #[test]
    fn test_last_name_takes_precedence() {
        let mut records = vec![
            employee("Leanne", "Graham"),
            employee("Ervin", "Howell"),
            employee("Clementine", "Bauch"),
            employee("Adam", "howell"),
        ];
        sort(&mut records, SortPolicy::LastName);

        assert_eq!(
            names(&records),
            vec![
                ("Clementine", "Bauch"),
                ("Leanne", "Graham"),
                ("Adam", "howell"),
                ("Ervin", "Howell"),
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut first = employee("Ann", "Lee");
        first.email = "first@example.com".to_string();
        let mut second = employee("ANN", "LEE");
        second.email = "second@example.com".to_string();

        let mut records = vec![first, employee("Bob", "Adams"), second];
        sort(&mut records, SortPolicy::LastName);

        assert_eq!(records[0].lastname, "Adams");
        assert_eq!(records[1].email, "first@example.com");
        assert_eq!(records[2].email, "second@example.com");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut records = vec![
            employee("Kurtis", "Weissnat"),
            employee("Nicholas", "Runolfsdottir"),
            employee("Glenna", "Reichert"),
            employee("Clementina", "DuBuque"),
        ];
        sort(&mut records, SortPolicy::LastName);
        let once = records.clone();
        sort(&mut records, SortPolicy::LastName);

        assert_eq!(records, once);
    }

    #[test]
    fn test_accented_last_names_collate_with_base_letter() {
        let mut records = vec![
            employee("Zoe", "Zimmer"),
            employee("Emile", "Élan"),
            employee("Otto", "Ebert"),
        ];
        sort(&mut records, SortPolicy::LastName);

        assert_eq!(
            names(&records),
            vec![("Otto", "Ebert"), ("Emile", "Élan"), ("Zoe", "Zimmer")]
        );
    }

    #[test]
    fn test_accented_first_names_collate_with_base_letter() {
        let mut records = vec![employee("Zoe", "Adams"), employee("Émile", "Brown")];
        sort(&mut records, SortPolicy::FirstName);

        assert_eq!(names(&records), vec![("Émile", "Brown"), ("Zoe", "Adams")]);
    }

    #[test]
    fn test_first_name_policy_ignores_last_name() {
        let mut records = vec![employee("zed", "Adams"), employee("Amy", "Zimmer")];
        sort(&mut records, SortPolicy::FirstName);

        assert_eq!(names(&records), vec![("Amy", "Zimmer"), ("zed", "Adams")]);
    }
}
