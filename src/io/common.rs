//! Sectioned single-file instance format.
//!
//! ```text
//! NODES,<count>
//! INDEX,Name,X-coordinate,Y-coordinate
//! <index>,<name>,<x|->,<y|->
//! ARCS,<count>
//! Index,Origin,Destination,Variable Cost,Fixed Cost,Capacity,Travel time
//! <index>,<origin>,<destination>,<variable>,<fixed>,<capacity>,<transit>
//! COMMODITIES,<count>
//! Index,Origin,Destination,Demand/Size,Earliest available time,Latest delivery time
//! <index>,<origin>,<destination>,<quantity>,<release>,<deadline>
//! horizon=<latest deadline - earliest release>
//! cost=<objective>                       (only with a solution)
//! PATHS,<count>
//! Index,Nodes
//! <index>,<node>,<node>,...
//! CONSOLIDATIONS,<count>
//! Origin,Destination,Commodities
//! <origin>,<destination>,<commodity>,...
//! ```
//!
//! Header rows are optional when reading. A negative capacity means
//! uncapacitated; `-` coordinates mean "no position".

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::record::{expect_columns, field, LineCursor};
use crate::error::{InstanceError, Result, Section};
use crate::models::{
    ArcKey, Commodity, Consolidation, Network, NetworkModel, NodeId, Position, Solution,
    VariableCost,
};

/// Reads an instance file in the common format.
pub fn read_common<P: AsRef<Path>>(path: P) -> Result<NetworkModel> {
    let text = fs::read_to_string(path.as_ref())?;
    let model = parse_common(&text)?;
    debug!(
        path = %path.as_ref().display(),
        arcs = model.network().arc_count(),
        commodities = model.num_commodities(),
        "read common instance"
    );
    Ok(model)
}

/// Parses an instance in the common format.
///
/// # Examples
///
/// ```
/// use u_netdesign::io::parse_common;
/// use u_netdesign::models::{ArcKey, Capacity};
///
/// let text = "\
/// NODES,2
/// 0,0,-,-
/// 1,1,-,-
/// ARCS,1
/// 0,0,1,0.5,12,-1,4
/// COMMODITIES,1
/// 0,0,1,2.5,0,10
/// horizon=10
/// ";
/// let model = parse_common(text).unwrap();
/// let arc = ArcKey::new(0, 1);
/// assert_eq!(model.transit_time(arc).unwrap(), 4.0);
/// assert_eq!(model.fixed_cost(arc).unwrap(), 12.0);
/// assert_eq!(model.capacity(arc), Capacity::Uncapacitated);
/// assert_eq!(model.commodities()[0].quantity, 2.5);
/// ```
pub fn parse_common(text: &str) -> Result<NetworkModel> {
    let mut cursor = LineCursor::new(text);

    while !cursor.skip_if("NODES") {
        if cursor.next_line().is_none() {
            return Err(InstanceError::MissingSection(Section::Nodes));
        }
    }

    let positions = parse_nodes(&mut cursor)?;
    let (network, variable_costs) = parse_arcs(&mut cursor)?;
    let commodities = parse_commodities(&mut cursor)?;

    cursor.skip_if("horizon");
    let solution = if cursor.peek().is_some_and(|line| line.starts_with("cost")) {
        Some(parse_solution(&mut cursor)?)
    } else {
        None
    };

    let (transit, capacities, fixed_costs) = network;
    let network = Network::new(
        transit,
        capacities,
        fixed_costs,
        VariableCost::Flat(variable_costs),
    )?
    .with_positions(positions);

    let mut model = NetworkModel::new(network, commodities);
    if let Some(solution) = solution {
        model = model.with_solution(solution);
    }
    warn_inverted_windows(&model);
    Ok(model)
}

type ArcMaps = (
    BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
    BTreeMap<ArcKey, f64>,
    BTreeMap<ArcKey, f64>,
);

fn parse_nodes(cursor: &mut LineCursor<'_>) -> Result<BTreeMap<NodeId, Position>> {
    cursor.skip_if("I");
    let mut positions = BTreeMap::new();

    loop {
        let Some((line_number, line)) = cursor.next_line() else {
            return Err(InstanceError::MissingSection(Section::Arcs));
        };
        if line.starts_with("ARCS") {
            return Ok(positions);
        }

        let fields: Vec<&str> = line.split(',').collect();
        expect_columns(&fields, 4, Section::Nodes, line_number)?;
        let node: NodeId = field(&fields, 0, "node index", Section::Nodes, line_number)?;

        if fields[2].trim() != "-" && fields[3].trim() != "-" {
            let x = field(&fields, 2, "x coordinate", Section::Nodes, line_number)?;
            let y = field(&fields, 3, "y coordinate", Section::Nodes, line_number)?;
            positions.insert(node, Position::new(x, y));
        }
    }
}

fn parse_arcs(cursor: &mut LineCursor<'_>) -> Result<(ArcMaps, BTreeMap<ArcKey, f64>)> {
    cursor.skip_if("I");
    let mut transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = BTreeMap::new();
    let mut capacities = BTreeMap::new();
    let mut fixed_costs = BTreeMap::new();
    let mut variable_costs = BTreeMap::new();

    loop {
        let Some((line_number, line)) = cursor.next_line() else {
            return Err(InstanceError::MissingSection(Section::Commodities));
        };
        if line.starts_with("COMMODITIES") {
            return Ok(((transit, capacities, fixed_costs), variable_costs));
        }

        let fields: Vec<&str> = line.split(',').collect();
        expect_columns(&fields, 7, Section::Arcs, line_number)?;
        let origin: NodeId = field(&fields, 1, "origin", Section::Arcs, line_number)?;
        let destination: NodeId = field(&fields, 2, "destination", Section::Arcs, line_number)?;
        let arc = ArcKey::new(origin, destination);

        variable_costs.insert(
            arc,
            field(&fields, 3, "variable cost", Section::Arcs, line_number)?,
        );
        fixed_costs.insert(
            arc,
            field(&fields, 4, "fixed cost", Section::Arcs, line_number)?,
        );
        let capacity: f64 = field(&fields, 5, "capacity", Section::Arcs, line_number)?;
        if capacity >= 0.0 {
            capacities.insert(arc, capacity);
        }
        transit.entry(origin).or_default().insert(
            destination,
            field(&fields, 6, "travel time", Section::Arcs, line_number)?,
        );
    }
}

fn parse_commodities(cursor: &mut LineCursor<'_>) -> Result<Vec<Commodity>> {
    cursor.skip_if("I");
    let mut commodities = Vec::new();

    while let Some(line) = cursor.peek() {
        if line.starts_with("horizon") || line.starts_with("cost") {
            break;
        }
        let line_number = cursor.line_number();
        cursor.next_line();

        let fields: Vec<&str> = line.split(',').collect();
        expect_columns(&fields, 6, Section::Commodities, line_number)?;
        let s = Section::Commodities;
        commodities.push(Commodity::new(
            field(&fields, 1, "origin", s, line_number)?,
            field(&fields, 4, "release time", s, line_number)?,
            field(&fields, 2, "destination", s, line_number)?,
            field(&fields, 5, "deadline", s, line_number)?,
            field(&fields, 3, "quantity", s, line_number)?,
        ));
    }

    Ok(commodities)
}

fn parse_solution(cursor: &mut LineCursor<'_>) -> Result<Solution> {
    let (line_number, line) = cursor
        .next_line()
        .ok_or(InstanceError::MissingSection(Section::Solution))?;
    let value = line
        .split_once('=')
        .map(|(_, value)| value)
        .ok_or_else(|| {
            InstanceError::parse(Section::Solution, line_number, "expected cost=<value>")
        })?;
    let mut solution = Solution::new(field(&[value], 0, "cost", Section::Solution, line_number)?);

    if !cursor.skip_if("PATHS") {
        return Err(InstanceError::MissingSection(Section::Paths));
    }
    cursor.skip_if("Index");

    loop {
        let Some((line_number, line)) = cursor.next_line() else {
            return Err(InstanceError::MissingSection(Section::Consolidations));
        };
        if line.starts_with("CONS") {
            break;
        }
        let fields = solution_fields(line);
        let path = (1..fields.len())
            .map(|i| field(&fields, i, "path node", Section::Paths, line_number))
            .collect::<Result<Vec<NodeId>>>()?;
        solution.add_path(path);
    }

    cursor.skip_if("Origin");
    while let Some((line_number, line)) = cursor.next_line() {
        let fields = solution_fields(line);
        expect_columns(&fields, 2, Section::Consolidations, line_number)?;
        let values = (0..fields.len())
            .map(|i| field(&fields, i, "node or commodity", Section::Consolidations, line_number))
            .collect::<Result<Vec<usize>>>()?;
        solution.add_consolidation(Consolidation::new(
            ArcKey::new(values[0], values[1]),
            values[2..].iter().copied(),
        ));
    }

    Ok(solution)
}

/// Cells of a path or consolidation row. An empty node or commodity list is
/// written as a trailing comma, which yields no cell here.
fn solution_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    if fields.len() > 1 && fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }
    fields
}

fn warn_inverted_windows(model: &NetworkModel) {
    let inverted = model.window_violations();
    if !inverted.is_empty() {
        warn!(
            count = inverted.len(),
            first = inverted[0],
            "commodities with release time after deadline"
        );
    }
}

/// Renders an instance, including its attached solution, in the common format.
///
/// Nodes without a position are written as `-,-`; uncapacitated arcs get
/// capacity `-1`. Per-commodity variable costs have no column in this format
/// and are written as 0.
pub fn format_common(model: &NetworkModel) -> String {
    let network = model.network();
    let mut out = String::new();

    let nodes = network.nodes();
    // writeln! into a String cannot fail
    let _ = writeln!(out, "NODES,{}", nodes.len());
    out.push_str("INDEX,Name,X-coordinate,Y-coordinate\n");
    for node in &nodes {
        let _ = match network.position(*node) {
            Some(p) => writeln!(out, "{node},{node},{},{}", p.x, p.y),
            None => writeln!(out, "{node},{node},-,-"),
        };
    }

    if network.variable_costs().is_per_commodity() {
        warn!("per-commodity variable costs are not representable in the common format");
    }

    let _ = writeln!(out, "ARCS,{}", network.arc_count());
    out.push_str("Index,Origin,Destination,Variable Cost,Fixed Cost,Capacity,Travel time\n");
    for (i, (arc, time)) in network.arcs().enumerate() {
        let variable = network.variable_costs().flat(arc).unwrap_or(0.0);
        let fixed = network.fixed_costs().get(&arc).copied().unwrap_or(time);
        let _ = writeln!(
            out,
            "{i},{},{},{variable},{fixed},{},{time}",
            arc.origin,
            arc.destination,
            network.capacity(arc).to_raw(),
        );
    }

    let _ = writeln!(out, "COMMODITIES,{}", model.num_commodities());
    out.push_str(
        "Index,Origin,Destination,Demand/Size,Earliest available time,Latest delivery time\n",
    );
    for (k, c) in model.commodities().iter().enumerate() {
        let _ = writeln!(
            out,
            "{k},{},{},{},{},{}",
            c.origin, c.destination, c.quantity, c.release_time, c.deadline
        );
    }
    let _ = writeln!(out, "horizon={}", model.horizon());

    if let Some(solution) = model.solution() {
        let _ = writeln!(out, "cost={}", solution.objective());

        let _ = writeln!(out, "PATHS,{}", solution.num_paths());
        out.push_str("Index,Nodes\n");
        for (k, path) in solution.paths().iter().enumerate() {
            let _ = writeln!(out, "{k},{}", join(path.iter()));
        }

        let _ = writeln!(out, "CONSOLIDATIONS,{}", solution.consolidations().len());
        out.push_str("Origin,Destination,Commodities\n");
        for c in solution.consolidations() {
            let _ = writeln!(
                out,
                "{},{},{}",
                c.arc.origin,
                c.arc.destination,
                join(c.commodities.iter())
            );
        }
    }

    out
}

fn join<'a>(values: impl Iterator<Item = &'a usize>) -> String {
    values
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes an instance in the common format.
pub fn write_common<W: Write>(model: &NetworkModel, mut writer: W) -> Result<()> {
    writer.write_all(format_common(model).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Saves an instance in the common format, replacing any existing file.
pub fn save_common<P: AsRef<Path>>(model: &NetworkModel, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_common(model, BufWriter::new(file))?;
    debug!(path = %path.as_ref().display(), "saved common instance");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Capacity;

    const SAMPLE: &str = "\
NODES,3
INDEX,Name,X-coordinate,Y-coordinate
0,0,1.5,2
1,1,-,-
2,2,-3,4
ARCS,3
Index,Origin,Destination,Variable Cost,Fixed Cost,Capacity,Travel time
0,0,1,0.5,10,20,3
1,1,2,0,7,-1,2.5
2,0,2,1,30,5,9
COMMODITIES,2
Index,Origin,Destination,Demand/Size,Earliest available time,Latest delivery time
0,0,2,1.25,0,12
1,1,2,0.5,3,8
horizon=12
";

    fn sample_model() -> NetworkModel {
        parse_common(SAMPLE).expect("valid instance")
    }

    #[test]
    fn test_parse_arcs() {
        let m = sample_model();
        let arc = ArcKey::new(0, 1);
        assert_eq!(m.network().arc_count(), 3);
        assert_eq!(m.transit_time(arc).expect("arc"), 3.0);
        assert_eq!(m.fixed_cost(arc).expect("arc"), 10.0);
        assert_eq!(m.variable_cost(arc, 0), 0.5);
        assert_eq!(m.capacity(arc), Capacity::Limited(20.0));
        assert_eq!(m.capacity(ArcKey::new(1, 2)), Capacity::Uncapacitated);
        assert_eq!(m.transit_time(ArcKey::new(1, 2)).expect("arc"), 2.5);
    }

    #[test]
    fn test_parse_positions() {
        let m = sample_model();
        assert_eq!(m.network().position(0), Some(Position::new(1.5, 2.0)));
        assert_eq!(m.network().position(1), None);
        assert_eq!(m.network().position(2), Some(Position::new(-3.0, 4.0)));
    }

    #[test]
    fn test_parse_commodities() {
        let m = sample_model();
        assert_eq!(
            m.commodities(),
            &[
                Commodity::new(0, 0.0, 2, 12.0, 1.25),
                Commodity::new(1, 3.0, 2, 8.0, 0.5),
            ]
        );
        assert!(m.solution().is_none());
    }

    #[test]
    fn test_parse_without_headers() {
        let text = "NODES,1\n0,0,-,-\nARCS,1\n0,0,1,0,1,1,1\nCOMMODITIES,0\n";
        let m = parse_common(text).expect("valid");
        assert_eq!(m.network().arc_count(), 1);
        assert_eq!(m.num_commodities(), 0);
    }

    #[test]
    fn test_parse_solution() {
        let text = format!(
            "{SAMPLE}cost=42.5\nPATHS,2\nIndex,Nodes\n0,0,2\n1,1,2\n\
             CONSOLIDATIONS,1\nOrigin,Destination,Commodities\n1,2,0,1\n"
        );
        let m = parse_common(&text).expect("valid");
        let sol = m.solution().expect("solution");
        assert_eq!(sol.objective(), 42.5);
        assert_eq!(sol.paths(), &[vec![0, 2], vec![1, 2]]);
        assert_eq!(
            sol.consolidations(),
            &[Consolidation::new(ArcKey::new(1, 2), [0, 1])]
        );
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(
            parse_common("nothing here"),
            Err(InstanceError::MissingSection(Section::Nodes))
        ));
        assert!(matches!(
            parse_common("NODES,0\n"),
            Err(InstanceError::MissingSection(Section::Arcs))
        ));
        assert!(matches!(
            parse_common("NODES,0\nARCS,0\n"),
            Err(InstanceError::MissingSection(Section::Commodities))
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        let text = "NODES,0\nARCS,1\n0,0,1,0,1\nCOMMODITIES,0\n";
        let err = parse_common(text).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::Parse {
                section: Section::Arcs,
                line: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_number_names_section() {
        let text = "NODES,0\nARCS,0\nCOMMODITIES,1\n0,0,1,x,0,5\n";
        let err = parse_common(text).unwrap_err();
        assert!(err.to_string().starts_with("invalid COMMODITIES section at line 4"));
    }

    #[test]
    fn test_format_layout() {
        let network = Network::from_arcs([(1, 2, 5.0)]).expect("valid");
        let model = NetworkModel::new(network, vec![Commodity::new(1, 0.0, 2, 20.0, 1.5)]);
        let text = format_common(&model);
        assert_eq!(
            text,
            "\
NODES,2
INDEX,Name,X-coordinate,Y-coordinate
1,1,-,-
2,2,-,-
ARCS,1
Index,Origin,Destination,Variable Cost,Fixed Cost,Capacity,Travel time
0,1,2,0,5,-1,5
COMMODITIES,1
Index,Origin,Destination,Demand/Size,Earliest available time,Latest delivery time
0,1,2,1.5,0,20
horizon=20
"
        );
    }

    #[test]
    fn test_format_includes_solution() {
        let mut sol = Solution::new(7.0);
        sol.add_path(vec![1, 2]);
        sol.add_consolidation(Consolidation::new(ArcKey::new(1, 2), [0]));
        let network = Network::from_arcs([(1, 2, 5.0)]).expect("valid");
        let model = NetworkModel::new(network, vec![Commodity::new(1, 0.0, 2, 20.0, 1.5)])
            .with_solution(sol.clone());

        let text = format_common(&model);
        assert!(text.contains("cost=7\nPATHS,1\nIndex,Nodes\n0,1,2\n"));
        assert!(text.ends_with("CONSOLIDATIONS,1\nOrigin,Destination,Commodities\n1,2,0\n"));

        let back = parse_common(&text).expect("valid");
        assert_eq!(back.solution(), Some(&sol));
    }

    #[test]
    fn test_empty_path_and_consolidation_round_trip() {
        let mut sol = Solution::new(3.0);
        sol.add_path(vec![]);
        sol.add_path(vec![1, 2]);
        sol.add_consolidation(Consolidation::new(ArcKey::new(1, 2), []));
        let network = Network::from_arcs([(1, 2, 5.0)]).expect("valid");
        let model = NetworkModel::new(network, vec![Commodity::new(1, 0.0, 2, 20.0, 1.5)])
            .with_solution(sol.clone());

        let text = format_common(&model);
        assert!(text.contains("Index,Nodes\n0,\n1,1,2\n"));
        assert!(text.ends_with("Origin,Destination,Commodities\n1,2,\n"));

        let back = parse_common(&text).expect("valid");
        assert_eq!(back.solution(), Some(&sol));
    }

    #[test]
    fn test_solution_fields() {
        assert_eq!(solution_fields("0,"), vec!["0"]);
        assert_eq!(solution_fields("1,2,"), vec!["1", "2"]);
        assert_eq!(solution_fields("1,2,0"), vec!["1", "2", "0"]);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("instance.txt");
        let original = sample_model();

        save_common(&original, &path).expect("saved");
        let back = read_common(&path).expect("read");

        assert_eq!(
            back.network().transit_times(),
            original.network().transit_times()
        );
        assert_eq!(back.network().capacities(), original.network().capacities());
        assert_eq!(back.network().fixed_costs(), original.network().fixed_costs());
        assert_eq!(back.network().positions(), original.network().positions());
        assert_eq!(back.commodities(), original.commodities());
    }

    #[test]
    fn test_round_trip_generated_defaults() {
        // no explicit fixed costs or capacities: defaults are written out
        let network = Network::from_arcs([(0, 1, 4.0), (1, 0, 6.0)]).expect("valid");
        let model = NetworkModel::new(network, vec![Commodity::new(0, 1.0, 1, 9.0, 0.37)]);
        let back = parse_common(&format_common(&model)).expect("valid");

        for (arc, _) in model.network().arcs() {
            assert_eq!(back.capacity(arc), model.capacity(arc));
            assert_eq!(
                back.fixed_cost(arc).expect("arc"),
                model.fixed_cost(arc).expect("arc")
            );
        }
        assert_eq!(back.commodities(), model.commodities());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_common(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, InstanceError::Io(_)));
    }
}
