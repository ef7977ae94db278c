//! Decode command: show what a bitmask value means under the loaded tables.

use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use scoreboard::xlog::parse_int_literal;
use scoreboard::{
    BitTable, Field, ScoreboardConfig, Tables, derive_bonesless, derive_mode, derive_won,
};

use crate::cli::DecodeArgs;

pub fn run(config: &ScoreboardConfig, args: DecodeArgs) -> Result<()> {
    let tables = config
        .load_tables()
        .context("Failed to load label tables")?;
    let field = Field::from_str(&args.field.to_lowercase())
        .map_err(|_| anyhow!("Unknown xlog field: {}", args.field))?;
    let value = parse_int_literal(&args.value)
        .ok_or_else(|| anyhow!("Not an integer: {}", args.value))?;

    let lines = describe(&tables, field, value)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// Human readable lines for one field value
fn describe(tables: &Tables, field: Field, value: u64) -> Result<Vec<String>> {
    let mut lines = vec![format!("{} = {} ({:#x})", field, value, value)];

    if field == Field::Flags {
        let mode = derive_mode(Some(value), &tables.flags).unwrap_or_default();
        lines.push(format!("mode: {}", mode));
        lines.push(format!("bonesless: {}", derive_bonesless(Some(value), &tables.flags)));
        return Ok(lines);
    }

    let mut found = false;
    for (kind, table) in [
        ("conducts", tables.conducts.get(field)),
        ("achievements", tables.achievements.get(field)),
    ] {
        if let Some(table) = table {
            found = true;
            lines.push(format!("{}: {}", kind, label_line(table, value)));
        }
    }
    if field == Field::Achieve {
        found = true;
        lines.push(format!("won: {}", derive_won(Some(value), "", tables.ascended_bit)));
    }

    if !found {
        bail!("No label table covers field {}", field);
    }
    Ok(lines)
}

fn label_line(table: &BitTable, value: u64) -> String {
    let labels = table.decode(value);
    if labels.is_empty() {
        "(none)".to_string()
    } else {
        labels.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreboard::{FieldTables, LabelSelector};

    fn tables() -> Tables {
        let conducts = FieldTables::from_json_str(
            r#"{"conduct": {"0x1": "Foodless", "0x2": "Vegan"}, "achieve": {"0x1000": "Blind"}}"#,
            LabelSelector::Values,
        )
        .unwrap();
        let achievements = FieldTables::from_json_str(
            r#"{"achieve": {"0x100": {"ascended": "won the game"}}}"#,
            LabelSelector::Keys,
        )
        .unwrap();
        Tables::new(conducts, achievements)
    }

    #[test]
    fn test_describe_conduct() {
        let lines = describe(&tables(), Field::Conduct, 3).unwrap();
        assert_eq!(lines, vec!["conduct = 3 (0x3)", "conducts: Foodless,Vegan"]);
    }

    #[test]
    fn test_describe_achieve_uses_both_tables() {
        let lines = describe(&tables(), Field::Achieve, 0x1100).unwrap();
        assert_eq!(lines[1], "conducts: Blind");
        assert_eq!(lines[2], "achievements: ascended");
        assert_eq!(lines[3], "won: true");
    }

    #[test]
    fn test_describe_flags() {
        let lines = describe(&tables(), Field::Flags, 0x6).unwrap();
        assert_eq!(lines[1], "mode: explore");
        assert_eq!(lines[2], "bonesless: true");
    }

    #[test]
    fn test_describe_top_bit() {
        let mut tables = tables();
        let mut tnnt = BitTable::new();
        tnnt.push(1 << 63, ["tnnt_last"]);
        tables.achievements.insert(Field::Tnntachieve1, tnnt);

        let value = parse_int_literal("0x8000000000000000").unwrap();
        let lines = describe(&tables, Field::Tnntachieve1, value).unwrap();
        assert_eq!(
            lines,
            vec![
                "tnntachieve1 = 9223372036854775808 (0x8000000000000000)",
                "achievements: tnnt_last",
            ]
        );
    }

    #[test]
    fn test_field_without_table() {
        assert!(describe(&tables(), Field::Turns, 1).is_err());
    }
}
