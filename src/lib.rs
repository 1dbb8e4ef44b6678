/*!
fabric-route-analysis
======================

This crate provides the route-analysis core of an InfiniBand-style subnet
diagnostic tool as a library. Given an in-memory snapshot of a switched
fabric (its nodes, ports, inter-port links, and per-switch linear
forwarding tables), it answers four families of questions:

* **Trace**: what sequence of switches and ports does a packet bearing a
  given source/destination LID traverse? See [`walker`] and [`trace`].
* **Tabulate**: how many routes cross each port, broken down into up-link
  vs down-link when the fabric is a fat-tree? See [`tabulate`] and [`tier`].
* **Validate reachability**: which source/destination pairs are
  unreachable? See [`validate`].
* **Validate absence of credit loops**: is the fabric's routing free of
  cyclic inter-switch channel dependencies that could deadlock
  credit-based flow control? See [`creditloop`].

# Usage

This crate is a library with no binary front-end; building, populating,
and persisting a [`fabric::Fabric`] snapshot is left to the caller (a
subnet-administration query client, a snapshot-file reader, or, as the
tests in this crate do, a hand-built fixture). The crate's own job starts
once a snapshot exists:

```no_run
use fabric_route_analysis::fabric::Fabric;
use fabric_route_analysis::trace::gen_trace_route;

# fn build_fabric() -> Fabric { Fabric::new() }
let fabric = build_fabric();
match gen_trace_route(&fabric, 1, 2, 64)
{
    Ok(records) => println!("route has {} hops", records.len()),
    Err(e) => println!("route could not be traced: {e}"),
}
```

# Scope

Out of scope, referenced only by interface: the subnet-administration
query client that populates a [`fabric::Fabric`], the file-format
deserializer for snapshots, any CLI/reporting front-end, and the
fabric-discovery and trap-processing subsystems that feed a live subnet
manager. This crate does not re-implement a subnet manager, does not
compute routing tables (it only consumes the ones already present in a
snapshot), does not validate service-level to virtual-lane mapping, and
does not emit packets on the wire.

# Module map

Control flow runs bottom-up: [`walker`] is the pivot every higher-level
module is built on. [`trace`], [`tabulate`], and [`validate`] all express
themselves as route-walk callbacks; [`creditloop`] is the exception,
bypassing the walker's callback API to build its own dependency graph from
[`path`]'s enumerated paths and [`trace`]'s records.

* [`fabric`]: the read-only snapshot, nodes, ports, links, linear
  forwarding tables, plus the LFT lookup rule.
* [`walker`]: the route-walking state machine.
* [`trace`]: structured per-device trace records built from a walk.
* [`path`]: synthetic LMC-expanded path records between two ports.
* [`tier`]: fat-tree tier classification.
* [`analysis`]: the side table holding tabulation counters and tiers,
  kept apart from the immutable snapshot.
* [`tabulate`]: per-port route counters across all host-interface pairs.
* [`report`]: routes crossing one particular port of interest.
* [`validate`]: unreachable source/destination pairs.
* [`creditloop`]: the channel-dependency graph build/prune/split/Dijkstra
  pipeline that detects credit loops.
* [`config`]: analysis run options (hop bound, fat-tree mode, verbosity).
* [`error`]: the closed `Error` taxonomy shared by every fallible
  operation in the crate.
* [`clock`]: the injectable monotonic clock and progress sink the
  credit-loop detector's instrumentation is built on.
*/

pub mod analysis;
pub mod clock;
pub mod config;
pub mod creditloop;
pub mod error;
pub mod fabric;
pub mod path;
pub mod report;
pub mod tabulate;
pub mod tier;
pub mod trace;
pub mod validate;
pub mod walker;
