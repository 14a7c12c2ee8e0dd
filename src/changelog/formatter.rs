//! Markdown rendering for collated sections and contributors.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::changelog::sections::ChangelogSection;
use crate::models::{Issue, User};

const THANK_YOU: &str = "## :heart: Contributors\n\n\
    We'd like to thank all the contributors who worked on this release!";

// An @ preceded by a word character (e-mail) or a backtick (already
// escaped) is not a mention.
static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^\w`])(@[\w-]+)").expect("mention pattern is valid"));

/// Renders the full changelog: every section in order, then contributors.
pub fn render(sections: &[(&ChangelogSection, Vec<Issue>)], contributors: &IndexSet<User>) -> String {
    let mut content = String::new();
    add_section_content(&mut content, sections);
    if !contributors.is_empty() {
        add_contributors_content(&mut content, contributors);
    }
    content
}

fn add_section_content(content: &mut String, sections: &[(&ChangelogSection, Vec<Issue>)]) {
    for (section, issues) in sections {
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(&format!("## {}\n\n", section));
        for issue in issues {
            content.push_str(&format_issue(issue));
        }
    }
}

fn add_contributors_content(content: &mut String, contributors: &IndexSet<User>) {
    content.push_str(&format!("\n{}\n\n", THANK_YOU));
    for contributor in contributors {
        content.push_str(&format!("- [@{}]({})\n", contributor.name, contributor.url));
    }
}

pub fn format_issue(issue: &Issue) -> String {
    format!(
        "- {} [#{}]({})\n",
        escape_mentions(&issue.title),
        issue.number,
        issue.url
    )
}

/// Wraps `@user` mentions in backticks so the changelog doesn't ping anyone.
pub fn escape_mentions(title: &str) -> String {
    MENTION.replace_all(title, "${1}`${2}`").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;

    fn issue(number: u64, title: &str) -> Issue {
        Issue {
            number,
            title: title.to_string(),
            url: format!("https://github.com/acme/widgets/issues/{}", number),
            labels: vec![Label::new("bug")],
            pull_request: None,
            user: None,
        }
    }

    #[test]
    fn test_escape_mentions() {
        assert_eq!(escape_mentions("Thanks @octocat for the fix"), "Thanks `@octocat` for the fix");
        assert_eq!(escape_mentions("@octo-cat found it"), "`@octo-cat` found it");
        assert_eq!(escape_mentions("(@a, @b)"), "(`@a`, `@b`)");
    }

    #[test]
    fn test_email_is_not_escaped() {
        assert_eq!(
            escape_mentions("user@example.com reported this"),
            "user@example.com reported this"
        );
    }

    #[test]
    fn test_already_escaped_mention_is_left_alone() {
        assert_eq!(escape_mentions("Use `@Bean` methods"), "Use `@Bean` methods");
    }

    #[test]
    fn test_format_issue() {
        let issue = issue(7, "Thanks @octocat for the fix");
        assert_eq!(
            format_issue(&issue),
            "- Thanks `@octocat` for the fix [#7](https://github.com/acme/widgets/issues/7)\n"
        );
    }

    #[test]
    fn test_render_sections_and_contributors() {
        let bugs = ChangelogSection::new("Bug Fixes", &["bug"]);
        let docs = ChangelogSection::new("Documentation", &["documentation"]);
        let sections = vec![(&bugs, vec![issue(1, "Fix A"), issue(2, "Fix B")]), (&docs, vec![issue(3, "Docs")])];
        let mut contributors = IndexSet::new();
        contributors.insert(User::new("alice", "https://github.com/alice"));

        let expected = "## Bug Fixes\n\n\
            - Fix A [#1](https://github.com/acme/widgets/issues/1)\n\
            - Fix B [#2](https://github.com/acme/widgets/issues/2)\n\
            \n\
            ## Documentation\n\n\
            - Docs [#3](https://github.com/acme/widgets/issues/3)\n\
            \n\
            ## :heart: Contributors\n\n\
            We'd like to thank all the contributors who worked on this release!\n\n\
            - [@alice](https://github.com/alice)\n";
        assert_eq!(render(&sections, &contributors), expected);
    }

    #[test]
    fn test_render_without_contributors() {
        let bugs = ChangelogSection::new("Bug Fixes", &["bug"]);
        let sections = vec![(&bugs, vec![issue(1, "Fix A")])];
        let output = render(&sections, &IndexSet::new());
        assert!(!output.contains("Contributors"));
    }

    #[test]
    fn test_render_nothing() {
        assert_eq!(render(&[], &IndexSet::new()), "");
    }
}
