// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Advomail CLI entrypoint.
//!
//! By default this runs the interactive TUI. Passing `--category` composes a single email
//! headlessly and prints it (or its `mailto:` URI) to stdout.

use std::error::Error;
use std::path::PathBuf;

use advomail::config::{AppConfig, ConfigOverrides};
use advomail::export::mailto_uri;
use advomail::model::{Directory, PartyId, RegionCode};
use advomail::state::{Category, ComposerState};
use advomail::template::Tone;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--data-dir <dir>] [--representatives <path>] [--parties <path>]\n  {program} [data options] --category leader --party <id> [--tone <tone>] [--subject <text>] [--mailto]\n  {program} [data options] --category mp --region <code> --representative <name> [--tone <tone>] [--subject <text>] [--mailto]\n\nWithout --category the interactive TUI starts.\n--data-dir defaults to `data` (or $ADVOMAIL_DATA_DIR) and holds politicians.json and parties.json.\n--tone is one of formal, neutral, friendly, concise (default formal).\n--mailto prints the mailto: URI instead of the email text.\n\nLogs go to $ADVOMAIL_LOG_FILE (default: advomail.log in the temp dir), filtered by $ADVOMAIL_LOG."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    data_dir: Option<PathBuf>,
    representatives: Option<PathBuf>,
    parties: Option<PathBuf>,
    category: Option<Category>,
    party: Option<String>,
    region: Option<String>,
    representative: Option<String>,
    tone: Option<Tone>,
    subject: Option<String>,
    mailto: bool,
}

impl CliOptions {
    fn is_headless(&self) -> bool {
        self.category.is_some()
    }

    fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            representatives: self.representatives.clone(),
            parties: self.parties.clone(),
            tone: self.tone,
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" => set_once(&mut options.data_dir, args.next().map(PathBuf::from))?,
            "--representatives" => {
                set_once(&mut options.representatives, args.next().map(PathBuf::from))?;
            }
            "--parties" => set_once(&mut options.parties, args.next().map(PathBuf::from))?,
            "--category" => {
                let raw = args.next().ok_or(())?;
                let category = raw.parse::<Category>().map_err(|_| ())?;
                set_once(&mut options.category, Some(category))?;
            }
            "--party" => set_once(&mut options.party, args.next())?,
            "--region" => set_once(&mut options.region, args.next())?,
            "--representative" => set_once(&mut options.representative, args.next())?,
            "--tone" => {
                let raw = args.next().ok_or(())?;
                let tone = raw.parse::<Tone>().map_err(|_| ())?;
                set_once(&mut options.tone, Some(tone))?;
            }
            "--subject" => set_once(&mut options.subject, args.next())?,
            "--mailto" => {
                if options.mailto {
                    return Err(());
                }
                options.mailto = true;
            }
            _ => return Err(()),
        }
    }

    let compose_flags = options.party.is_some()
        || options.region.is_some()
        || options.representative.is_some()
        || options.subject.is_some()
        || options.mailto;
    if compose_flags && !options.is_headless() {
        return Err(());
    }

    match options.category {
        Some(Category::Leader)
            if options.region.is_some() || options.representative.is_some() =>
        {
            return Err(())
        }
        Some(Category::Representative) if options.party.is_some() => return Err(()),
        _ => {}
    }

    Ok(options)
}

/// Runs one composition headlessly and returns what should be printed.
fn compose(directory: Directory, options: &CliOptions, tone: Tone) -> Result<String, Box<dyn Error>> {
    let mut state = ComposerState::with_tone(directory, tone);
    state.select_category(options.category);

    if let Some(party) = options.party.as_deref() {
        state.select_party(PartyId::new(party)?)?;
    }
    if let Some(region) = options.region.as_deref() {
        if !state.directory().contains_region(region) {
            return Err(format!("unknown region: {region}").into());
        }
        state.select_region(RegionCode::new(region)?)?;
    }
    if let Some(name) = options.representative.as_deref() {
        let choices = state.representative_choices();
        if choices.is_empty() {
            return Err("no representatives listed for this region".into());
        }
        if !choices.iter().any(|choice| choice.value == name) {
            return Err(format!("unknown representative for this region: {name}").into());
        }
        state.select_representative(name)?;
    }
    if let Some(subject) = options.subject.as_deref() {
        state.set_subject_override(subject);
    }

    let text = state.generate()?.output_text();
    Ok(if options.mailto { mailto_uri(&text) } else { text })
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "advomail".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = match AppConfig::from_env(options.config_overrides()) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{program}: {err}");
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Err(err) = advomail::logging::init(&config) {
            eprintln!("{program}: logging disabled: {err}");
        }

        if options.is_headless() {
            let directory = config.data_source().load_blocking()?;
            println!("{}", compose(directory, &options, config.default_tone)?);
            return Ok(());
        }

        advomail::tui::run(&config)
    })();

    if let Err(err) = result {
        tracing::error!(error = %err, "exiting with error");
        eprintln!("advomail: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use advomail::model::{Directory, Party, PartyId, RegionCode, Representative};
    use advomail::state::Category;
    use advomail::template::Tone;

    use super::{compose, parse_options, CliOptions};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    fn directory() -> Directory {
        let mut reps = BTreeMap::new();
        reps.insert(
            RegionCode::new("vic").expect("region"),
            vec![Representative::new("Zoe Adams")],
        );
        reps.insert(RegionCode::new("act").expect("region"), Vec::new());
        Directory::new(
            vec![Party::new(PartyId::new("partyA").expect("party"), "Party A")],
            reps,
        )
    }

    #[test]
    fn parses_empty_args() {
        let options = parse(&[]).expect("parse options");
        assert_eq!(options, CliOptions::default());
        assert!(!options.is_headless());
    }

    #[test]
    fn parses_data_paths() {
        let options =
            parse(&["--data-dir", "/srv/data", "--parties", "p.json"]).expect("parse options");
        assert_eq!(options.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(options.parties, Some(PathBuf::from("p.json")));
        assert_eq!(options.config_overrides().parties, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn parses_leader_compose() {
        let options = parse(&["--category", "leader", "--party", "partyA", "--tone", "concise"])
            .expect("parse options");
        assert_eq!(options.category, Some(Category::Leader));
        assert_eq!(options.party.as_deref(), Some("partyA"));
        assert_eq!(options.tone, Some(Tone::Concise));
        assert!(options.is_headless());
    }

    #[test]
    fn parses_representative_compose_with_mailto() {
        let options = parse(&[
            "--category",
            "mp",
            "--region",
            "vic",
            "--representative",
            "Zoe Adams",
            "--mailto",
        ])
        .expect("parse options");
        assert_eq!(options.category, Some(Category::Representative));
        assert_eq!(options.representative.as_deref(), Some("Zoe Adams"));
        assert!(options.mailto);
    }

    #[test]
    fn rejects_unknown_args_and_values() {
        assert!(parse(&["--nope"]).is_err());
        assert!(parse(&["positional"]).is_err());
        assert!(parse(&["--category", "senator"]).is_err());
        assert!(parse(&["--category", "leader", "--tone", "shouty"]).is_err());
    }

    #[test]
    fn rejects_duplicate_flags() {
        assert!(parse(&["--data-dir", "a", "--data-dir", "b"]).is_err());
        assert!(parse(&["--category", "leader", "--mailto", "--mailto"]).is_err());
    }

    #[test]
    fn rejects_missing_values() {
        assert!(parse(&["--data-dir"]).is_err());
        assert!(parse(&["--category", "leader", "--party"]).is_err());
    }

    #[test]
    fn rejects_compose_flags_without_category() {
        assert!(parse(&["--party", "partyA"]).is_err());
        assert!(parse(&["--mailto"]).is_err());
    }

    #[test]
    fn rejects_flags_from_the_other_flow() {
        assert!(parse(&["--category", "leader", "--region", "vic"]).is_err());
        assert!(parse(&["--category", "mp", "--party", "partyA"]).is_err());
    }

    #[test]
    fn compose_prints_email_text() {
        let options = parse(&["--category", "leader", "--party", "partyA"]).expect("options");
        let text = compose(directory(), &options, Tone::Formal).expect("compose");
        assert!(text.starts_with(
            "Subject: Request for meeting with Party A Party Leader\n\nDear Party A Party Leader,"
        ));
    }

    #[test]
    fn compose_prints_mailto_uri() {
        let options = parse(&[
            "--category",
            "mp",
            "--region",
            "vic",
            "--representative",
            "Zoe Adams",
            "--subject",
            "Hello",
            "--mailto",
        ])
        .expect("options");
        let uri = compose(directory(), &options, Tone::Formal).expect("compose");
        assert!(uri.starts_with("mailto:?subject=Hello&body=Dear%20Zoe%20Adams%2C"));
    }

    #[test]
    fn compose_reports_incomplete_and_unknown_selections() {
        let options = parse(&["--category", "leader"]).expect("options");
        let err = compose(directory(), &options, Tone::Formal).unwrap_err();
        assert_eq!(err.to_string(), "select a party first");

        let options = parse(&["--category", "mp", "--region", "tas"]).expect("options");
        let err = compose(directory(), &options, Tone::Formal).unwrap_err();
        assert_eq!(err.to_string(), "unknown region: tas");

        let options = parse(&["--category", "mp", "--region", "vic", "--representative", "Nobody"])
            .expect("options");
        let err = compose(directory(), &options, Tone::Formal).unwrap_err();
        assert!(err.to_string().starts_with("unknown representative"));
    }

    #[test]
    fn compose_distinguishes_empty_region_from_unknown_region() {
        let options = parse(&["--category", "mp", "--region", "act", "--representative", "Ann Lee"])
            .expect("options");
        let err = compose(directory(), &options, Tone::Formal).unwrap_err();
        assert_eq!(err.to_string(), "no representatives listed for this region");

        let options = parse(&["--category", "mp", "--region", "act"]).expect("options");
        let err = compose(directory(), &options, Tone::Formal).unwrap_err();
        assert_ne!(err.to_string(), "unknown region: act");
    }
}
