//! Directory-based CSV format.
//!
//! A directory holds four files, each with a header row:
//!
//! - `nodes.csv`: `id,...`; row order defines the dense node indices
//! - `commodities.csv`: `id,origin,destination,demand,release_time,deadline[,_,path]`
//!   where the optional eighth column is a bracketed node list such as
//!   `"['a', 'b', 'c']"`
//! - `variable_costs.csv`: `commodity,<arc id>,<arc id>,...`, one row per
//!   commodity
//! - `arcs.csv`: `id,origin,destination,transit_time,capacity,fixed_cost,variable_cost`
//!
//! An empty `variable_cost` cell means the arc is priced per commodity from
//! `variable_costs.csv`; a filled one applies to every commodity.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::record::{expect_columns, field, split_record, LineCursor};
use crate::error::{InstanceError, Result, Section};
use crate::models::{ArcKey, Commodity, Network, NetworkModel, NodeId, VariableCost};

const FIXED_PATH_COLUMN: usize = 7;

/// Reads an instance from a directory of CSV files.
///
/// Variable costs come back as [`VariableCost::PerCommodity`].
pub fn read_directory<P: AsRef<Path>>(dir: P) -> Result<NetworkModel> {
    let dir = dir.as_ref();
    let nodes = parse_nodes(&fs::read_to_string(dir.join("nodes.csv"))?)?;
    let (commodities, commodity_ids, fixed_paths) =
        parse_commodities(&fs::read_to_string(dir.join("commodities.csv"))?, &nodes)?;
    let costs = parse_variable_costs(
        &fs::read_to_string(dir.join("variable_costs.csv"))?,
        &commodity_ids,
    )?;
    let network = parse_arcs(
        &fs::read_to_string(dir.join("arcs.csv"))?,
        &nodes,
        &costs,
        commodities.len(),
    )?;

    let mut model = NetworkModel::new(network, commodities);
    if !fixed_paths.is_empty() {
        model = model.with_fixed_paths(fixed_paths);
    }
    let inverted = model.window_violations();
    if !inverted.is_empty() {
        warn!(count = inverted.len(), "commodities with release time after deadline");
    }
    debug!(
        dir = %dir.display(),
        nodes = nodes.len(),
        arcs = model.network().arc_count(),
        commodities = model.num_commodities(),
        "read directory instance"
    );
    Ok(model)
}

/// Rows after the header, split into cells.
fn records(text: &str) -> impl Iterator<Item = (usize, Vec<String>)> + '_ {
    let mut cursor = LineCursor::new(text);
    cursor.next_line();
    std::iter::from_fn(move || cursor.next_line()).map(|(n, line)| (n, split_record(line)))
}

fn parse_nodes(text: &str) -> Result<HashMap<String, NodeId>> {
    let mut nodes = HashMap::new();
    for (line, row) in records(text) {
        expect_columns(&row, 1, Section::Nodes, line)?;
        let next = nodes.len();
        nodes.entry(row[0].trim().to_string()).or_insert(next);
    }
    Ok(nodes)
}

fn node(nodes: &HashMap<String, NodeId>, name: &str) -> Result<NodeId> {
    let name = name.trim();
    nodes
        .get(name)
        .copied()
        .ok_or_else(|| InstanceError::UnknownNode(name.to_string()))
}

type CommodityRows = (Vec<Commodity>, HashMap<String, usize>, Vec<Vec<ArcKey>>);

fn parse_commodities(text: &str, nodes: &HashMap<String, NodeId>) -> Result<CommodityRows> {
    let mut commodities = Vec::new();
    let mut ids = HashMap::new();
    let mut fixed_paths = Vec::new();
    let s = Section::Commodities;

    for (line, row) in records(text) {
        expect_columns(&row, 6, s, line)?;
        ids.insert(row[0].trim().to_string(), commodities.len());
        commodities.push(Commodity::new(
            node(nodes, &row[1])?,
            field(&row, 4, "release time", s, line)?,
            node(nodes, &row[2])?,
            field(&row, 5, "deadline", s, line)?,
            field(&row, 3, "demand", s, line)?,
        ));

        if let Some(path) = row.get(FIXED_PATH_COLUMN) {
            fixed_paths.push(parse_fixed_path(path, nodes)?);
        }
    }

    Ok((commodities, ids, fixed_paths))
}

/// Parses `['a', 'b', 'c']` into the arcs `a → b → c`.
fn parse_fixed_path(cell: &str, nodes: &HashMap<String, NodeId>) -> Result<Vec<ArcKey>> {
    let path = cell
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|n| n.trim_matches(|c: char| c == ' ' || c == '\''))
        .filter(|n| !n.is_empty())
        .map(|n| node(nodes, n))
        .collect::<Result<Vec<NodeId>>>()?;

    Ok(path.windows(2).map(|w| ArcKey::new(w[0], w[1])).collect())
}

/// Per-commodity cost cells keyed by arc id, in commodity order.
fn parse_variable_costs(
    text: &str,
    commodity_ids: &HashMap<String, usize>,
) -> Result<Vec<HashMap<String, String>>> {
    let mut cursor = LineCursor::new(text);
    let Some((_, header)) = cursor.next_line() else {
        return Err(InstanceError::MissingSection(Section::VariableCosts));
    };
    let arc_columns: Vec<(usize, String)> = split_record(header)
        .into_iter()
        .enumerate()
        .filter(|(_, name)| name.trim() != "commodity")
        .map(|(i, name)| (i, name.trim().to_string()))
        .collect();

    let mut costs = vec![HashMap::new(); commodity_ids.len()];
    while let Some((line, text)) = cursor.next_line() {
        let row = split_record(text);
        expect_columns(&row, 1, Section::VariableCosts, line)?;
        let id = row[0].trim();
        let &k = commodity_ids.get(id).ok_or_else(|| {
            InstanceError::parse(
                Section::VariableCosts,
                line,
                format!("unknown commodity {id:?}"),
            )
        })?;
        costs[k] = arc_columns
            .iter()
            .filter_map(|(i, arc)| row.get(*i).map(|v| (arc.clone(), v.trim().to_string())))
            .collect();
    }
    Ok(costs)
}

fn parse_arcs(
    text: &str,
    nodes: &HashMap<String, NodeId>,
    commodity_costs: &[HashMap<String, String>],
    num_commodities: usize,
) -> Result<Network> {
    let mut transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = BTreeMap::new();
    let mut capacities = BTreeMap::new();
    let mut fixed_costs = BTreeMap::new();
    let mut variable_costs = vec![BTreeMap::new(); num_commodities];
    let s = Section::Arcs;

    for (line, row) in records(text) {
        expect_columns(&row, 7, s, line)?;
        let arc_id = row[0].trim();
        let arc = ArcKey::new(node(nodes, &row[1])?, node(nodes, &row[2])?);

        transit
            .entry(arc.origin)
            .or_default()
            .insert(arc.destination, field(&row, 3, "transit time", s, line)?);
        let capacity: f64 = field(&row, 4, "capacity", s, line)?;
        if capacity >= 0.0 {
            capacities.insert(arc, capacity);
        }
        fixed_costs.insert(arc, field(&row, 5, "fixed cost", s, line)?);

        let flat: Option<f64> = if row[6].trim().is_empty() {
            None
        } else {
            Some(field(&row, 6, "variable cost", s, line)?)
        };

        for (k, costs) in variable_costs.iter_mut().enumerate() {
            let cost = match flat {
                Some(cost) => cost,
                None => commodity_cost(commodity_costs, k, arc_id, line)?,
            };
            costs.insert(arc, cost);
        }
    }

    Network::new(
        transit,
        capacities,
        fixed_costs,
        VariableCost::PerCommodity(variable_costs),
    )
}

fn commodity_cost(
    costs: &[HashMap<String, String>],
    k: usize,
    arc_id: &str,
    line: usize,
) -> Result<f64> {
    let raw = costs
        .get(k)
        .and_then(|c| c.get(arc_id))
        .ok_or_else(|| {
            InstanceError::parse(
                Section::Arcs,
                line,
                format!("no per-commodity cost for commodity {k} on arc {arc_id:?}"),
            )
        })?;
    raw.parse().map_err(|_| {
        InstanceError::parse(
            Section::Arcs,
            line,
            format!("invalid per-commodity cost {raw:?} for commodity {k} on arc {arc_id:?}"),
        )
    })
}
