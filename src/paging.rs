use crate::models::UserSummary;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

/// Case-insensitive substring match over name and email.
pub fn filter_users(users: &[UserSummary], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    users
        .iter()
        .enumerate()
        .filter(|(_, user)| {
            needle.is_empty()
                || user.name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
        .map(|(index, _)| index)
        .collect()
}

/// Clamp a requested page into [1, total_pages] and compute slice bounds.
/// An empty result still has one (empty) page.
pub fn paginate(total: usize, requested: usize) -> Page {
    let total_pages = (total.div_ceil(PAGE_SIZE)).max(1);
    let page = requested.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);
    Page {
        page,
        total_pages,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    fn user(name: &str, email: &str) -> UserSummary {
        UserSummary {
            id: 0,
            name: name.to_string(),
            email: email.to_string(),
            status: UserStatus::Active,
            joined: "2024-01-01".parse().unwrap(),
            habits: 0,
        }
    }

    #[test]
    fn filter_matches_name_or_email_case_insensitive() {
        let users = vec![
            user("Ada Lovelace", "ada@example.com"),
            user("Grace Hopper", "grace@navy.mil"),
            user("Alan Turing", "alan@bletchley.uk"),
        ];
        assert_eq!(filter_users(&users, "ADA"), vec![0]);
        assert_eq!(filter_users(&users, "navy"), vec![1]);
        assert_eq!(filter_users(&users, "a"), vec![0, 1, 2]);
        assert_eq!(filter_users(&users, ""), vec![0, 1, 2]);
        assert!(filter_users(&users, "zelda").is_empty());
    }

    #[test]
    fn paginate_empty_result_keeps_one_page() {
        let page = paginate(0, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.start, 0);
        assert_eq!(page.end, 0);
    }

    #[test]
    fn paginate_clamps_past_the_last_page() {
        let page = paginate(25, 9);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.start, 20);
        assert_eq!(page.end, 25);

        let page = paginate(25, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn paginate_exact_multiple_of_page_size() {
        let page = paginate(20, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.start, 10);
        assert_eq!(page.end, 20);
    }
}
