//! Build information tests
//!
//! The build ID is generated by build.rs as `YYYY.MM.DD+g<short-sha>`, or just
//! `YYYY.MM.DD` when git is unavailable.

fn check_date(date_part: &str) {
    let pieces: Vec<&str> = date_part.split('.').collect();
    assert_eq!(pieces.len(), 3, "Date should have 3 components (YYYY.MM.DD)");

    assert_eq!(pieces[0].len(), 4, "Year should be 4 digits");
    pieces[0].parse::<u16>().expect("Year should be valid number");

    assert_eq!(pieces[1].len(), 2, "Month should be 2 digits");
    let month: u8 = pieces[1].parse().expect("Month should be valid number");
    assert!((1..=12).contains(&month), "Month should be 01-12");

    assert_eq!(pieces[2].len(), 2, "Day should be 2 digits");
    let day: u8 = pieces[2].parse().expect("Day should be valid number");
    assert!((1..=31).contains(&day), "Day should be 01-31");
}

#[test]
fn test_build_id_format() {
    let build_id = env!("NICCONF_BUILD_ID");
    println!("Build ID: {}", build_id);

    match build_id.split_once('+') {
        Some((date_part, git_part)) => {
            check_date(date_part);
            let sha = git_part
                .strip_prefix('g')
                .expect("Git part should start with 'g'");
            assert!(!sha.is_empty(), "Short SHA should not be empty");
            assert!(
                sha.chars().all(|c| c.is_ascii_hexdigit()),
                "Short SHA should contain only hex characters"
            );
        }
        None => check_date(build_id),
    }
}
