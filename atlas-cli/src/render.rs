//! Text and JSON output

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use atlas_core::{
    Catalog, Figure, Foot, PartnerSequence, Sequence, SoloSequence, Stance, State, StepUnit,
};

fn json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Name for anything the generator can place in a sequence
pub trait Labeled {
    fn label(&self) -> String;
}

impl Labeled for StepUnit {
    fn label(&self) -> String {
        StepUnit::label(self)
    }
}

impl Labeled for Figure {
    fn label(&self) -> String {
        Figure::label(self)
    }
}

/// `Weight on LEFT  [Basic Step In Place, Single Forward]  Weight on RIGHT`
pub fn sequences<S>(
    out: &mut dyn Write,
    sequences: &[Sequence<S>],
    as_json: bool,
) -> Result<()>
where
    S: Stance + Described,
    S::Unit: Labeled,
{
    if as_json {
        return json(out, sequences);
    }

    for sequence in sequences {
        let names: Vec<String> = sequence.units.iter().map(Labeled::label).collect();
        writeln!(
            out,
            "{}  [{}]  {}",
            sequence.start.describe(),
            names.join(", "),
            sequence.end.describe()
        )?;
    }
    writeln!(out, "{} sequences", sequences.len())?;
    Ok(())
}

/// How a start or end stance reads in text output
pub trait Described {
    fn describe(&self) -> String;
}

impl Described for Foot {
    fn describe(&self) -> String {
        format!("Weight on {}", self)
    }
}

impl Described for State {
    fn describe(&self) -> String {
        self.to_string()
    }
}

fn unit_names(units: &[StepUnit]) -> String {
    units.iter().map(StepUnit::label).collect::<Vec<_>>().join(", ")
}

/// Figures that can be danced from `from`. The heading is text-only.
pub fn figures(
    out: &mut dyn Write,
    from: &State,
    figures: &[Figure],
    as_json: bool,
) -> Result<()> {
    if as_json {
        return json(out, figures);
    }
    writeln!(out, "From {}:", from)?;
    for figure in figures {
        writeln!(out, "  {}", figure.label())?;
    }
    Ok(())
}

pub fn feet(out: &mut dyn Write, feet: &[Foot], as_json: bool) -> Result<()> {
    if as_json {
        return json(out, feet);
    }
    for foot in feet {
        writeln!(out, "  Weight on {}", foot)?;
    }
    Ok(())
}

pub fn states(out: &mut dyn Write, states: &[State], as_json: bool) -> Result<()> {
    if as_json {
        return json(out, states);
    }
    for state in states {
        writeln!(out, "  {}", state)?;
    }
    Ok(())
}

pub fn catalog(out: &mut dyn Write, catalog: &Catalog, as_json: bool) -> Result<()> {
    if as_json {
        return json(out, catalog.entries());
    }
    for entry in catalog.entries() {
        let steps = match &entry.figure {
            Figure::Solo(unit) => unit.step_count().to_string(),
            Figure::Partner(_) => "pair".to_string(),
        };
        writeln!(
            out,
            "  {:<32} {:<5} {:<13} {}",
            entry.label(),
            steps,
            entry.difficulty().label(),
            entry.tags.join(", ")
        )?;
    }
    Ok(())
}

pub fn solo_sequences(
    out: &mut dyn Write,
    sequences: &[SoloSequence],
    start: Foot,
    as_json: bool,
) -> Result<()> {
    if as_json {
        return json(out, sequences);
    }
    for sequence in sequences {
        let end = sequence.end_foot(start)?;
        let id = sequence.id.as_deref().unwrap_or("-");
        writeln!(
            out,
            "  {:<8} {:<32} {} → {}",
            id,
            sequence.label(),
            start,
            end
        )?;
    }
    Ok(())
}

pub fn partner_sequences(
    out: &mut dyn Write,
    sequences: &[PartnerSequence],
    as_json: bool,
) -> Result<()> {
    if as_json {
        return json(out, sequences);
    }
    for sequence in sequences {
        let title = sequence.title.as_deref().unwrap_or("(untitled)");
        let end = State::Partner(sequence.end_state()?);
        writeln!(out, "  {}  ({} beats, ends {})", title, sequence.beats.len(), end)?;
        writeln!(out, "    lead:   {}", unit_names(&sequence.lead_sequence().units))?;
        writeln!(out, "    follow: {}", unit_names(&sequence.follow_sequence().units))?;
    }
    Ok(())
}
