extern crate num;
use clap::Parser;
use colored::*;
use num::FromPrimitive;
use predctx::hashmap;
use predctx::*;
use std::collections::HashMap;
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Reference frame family (baseline or extended)
    #[clap(long, default_value = "baseline")]
    reference_set: String,
    /// Reference sign biases (FRAME=0|1[,FRAME=0|1,...])
    #[clap(long)]
    sign_bias: Option<String>,
    /// Symbol to dump; every symbol of the reference set if omitted
    #[clap(long)]
    symbol: Option<String>,
    /// Size of the current block (e.g. BLOCK_16X16)
    #[clap(long, default_value = "BLOCK_8X8")]
    block_size: String,
}

/// Neighbour states worth distinguishing for `symbol`, with a short label.
fn neighbor_states(
    symbol: ContextSymbol,
    roles: &RefFrameRoles,
    bsize: BlockSize,
) -> Vec<(String, Option<ModeInfo>)> {
    let mut states = vec![
        ("-".to_string(), None),
        ("intra".to_string(), Some(ModeInfo::intra(bsize))),
    ];
    let singles = roles
        .reference_set
        .ref_frames()
        .iter()
        .map(|&ref_frame| (ref_frame.name().to_string(), ModeInfo::single(bsize, ref_frame)))
        .collect::<Vec<_>>();

    match symbol {
        ContextSymbol::SwitchableInterp => {
            for i in 0..SWITCHABLE_FILTER_CONTEXTS {
                if let Some(filter) = InterpFilter::from_usize(i) {
                    let mi = ModeInfo {
                        interp_filter: filter,
                        ..ModeInfo::single(bsize, RefFrame::LAST_FRAME)
                    };
                    states.push((format!("{:?}", filter), Some(mi)));
                }
            }
        }
        ContextSymbol::TxSize => {
            for i in 0..=bsize.max_tx_size() as usize {
                if let Some(tx_size) = TxSize::from_usize(i) {
                    let mi = ModeInfo {
                        tx_size,
                        ..ModeInfo::single(bsize, RefFrame::LAST_FRAME)
                    };
                    states.push((format!("{:?}", tx_size), Some(mi)));
                }
            }
            let skipped = ModeInfo {
                skip: true,
                ..ModeInfo::single(bsize, RefFrame::LAST_FRAME)
            };
            states.push(("skip".to_string(), Some(skipped)));
        }
        ContextSymbol::CopyMode => {
            let copy = ModeInfo {
                copy_mode: CopyMode::REF0,
                ..ModeInfo::single(bsize, RefFrame::LAST_FRAME)
            };
            states.push(("inter".to_string(), Some(ModeInfo::single(bsize, RefFrame::LAST_FRAME))));
            states.push(("copy".to_string(), Some(copy)));
        }
        ContextSymbol::Skip | ContextSymbol::SegIdPredicted => {
            let flagged = ModeInfo {
                skip: true,
                seg_id_predicted: true,
                ..ModeInfo::single(bsize, RefFrame::LAST_FRAME)
            };
            states.push(("set".to_string(), Some(flagged)));
        }
        ContextSymbol::IntraInter | ContextSymbol::ReferenceMode | ContextSymbol::RefFrame(_) => {
            for (name, mi) in singles {
                states.push((name, Some(mi)));
            }
            if roles.compound_reference_allowed() {
                let fixed_slot = roles.fixed_slot_index();
                for &var_ref in roles.comp_var_refs() {
                    let mut ref_frame = [RefFrame::NONE; 2];
                    ref_frame[fixed_slot] = roles.comp_fixed_ref;
                    ref_frame[1 - fixed_slot] = var_ref;
                    let mi = ModeInfo::compound(bsize, ref_frame[0], ref_frame[1]);
                    states.push((
                        format!("{}+{}", ref_frame[0].name(), ref_frame[1].name()),
                        Some(mi),
                    ));
                }
            }
        }
    }
    states
}

fn parse_reference_set(s: &str) -> Result<ReferenceSet, String> {
    match s {
        "baseline" => Ok(ReferenceSet::Baseline),
        "extended" => Ok(ReferenceSet::Extended),
        _ => Err(format!("Invalid reference-set: {}", s)),
    }
}

fn parse_sign_bias(
    s: &str,
    reference_set: ReferenceSet,
) -> Result<Vec<(RefFrame, bool)>, String> {
    let frames: HashMap<&str, RefFrame> = hashmap!(
        "LAST" => RefFrame::LAST_FRAME,
        "LAST2" => RefFrame::LAST2_FRAME,
        "LAST3" => RefFrame::LAST3_FRAME,
        "LAST4" => RefFrame::LAST4_FRAME,
        "GOLDEN" => RefFrame::GOLDEN_FRAME,
        "ALTREF" => RefFrame::ALTREF_FRAME
    );
    let mut sign_bias = vec![];
    for param in s.split(',') {
        let param = param.split('=').collect::<Vec<&str>>();
        let (ref_frame, bias) = match param[..] {
            [key, val] => match (frames.get(key), val) {
                (Some(&ref_frame), "0") => (ref_frame, false),
                (Some(&ref_frame), "1") => (ref_frame, true),
                _ => return Err(format!("Invalid sign-bias: {}", s)),
            },
            _ => return Err(format!("Invalid sign-bias: {}", s)),
        };
        if !reference_set.contains(ref_frame) {
            return Err(format!(
                "{} is not part of the {} reference set",
                ref_frame.name(),
                reference_set.name()
            ));
        }
        sign_bias.push((ref_frame, bias));
    }
    Ok(sign_bias)
}

fn parse_block_size(s: &str) -> Result<BlockSize, String> {
    (0..BLOCK_SIZES)
        .filter_map(BlockSize::from_usize)
        .find(|bsize| format!("{:?}", bsize) == s)
        .ok_or_else(|| format!("Invalid block-size: {}", s))
}

fn parse_symbols(s: Option<&str>, reference_set: ReferenceSet) -> Result<Vec<ContextSymbol>, String> {
    let symbols = ContextSymbol::all(reference_set);
    match s {
        None => Ok(symbols),
        Some(name) => symbols
            .into_iter()
            .find(|symbol| symbol.name() == name)
            .map(|symbol| vec![symbol])
            .ok_or_else(|| format!("Unknown symbol for the {} reference set: {}", reference_set.name(), name)),
    }
}

fn dump_symbol(symbol: ContextSymbol, roles: &RefFrameRoles, bsize: BlockSize) {
    let states = neighbor_states(symbol, roles, bsize);
    let mut histogram = vec![0usize; symbol.num_contexts()];
    println!(
        "{} ({} contexts)",
        symbol.name().bold(),
        symbol.num_contexts()
    );
    for (above_name, above) in states.iter() {
        for (left_name, left) in states.iter() {
            let nb = Neighbors::new(above.as_ref(), left.as_ref());
            let ctx = derive_ctx(symbol, &nb, roles, bsize);
            histogram[ctx] += 1;
            println!("  {:>14} {:>14} -> {}", above_name, left_name, ctx);
        }
    }
    let summary = histogram
        .iter()
        .enumerate()
        .map(|(ctx, n)| format!("{}:{}", ctx, n))
        .collect::<Vec<String>>()
        .join(" ");
    println!("  {} {}", "histogram".green(), summary);
}

fn main() {
    let args = Args::parse();

    let reference_set = match parse_reference_set(&args.reference_set) {
        Ok(reference_set) => reference_set,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            process::exit(1);
        }
    };

    let mut roles = RefFrameRoles::new(reference_set);
    if let Some(sign_bias) = args.sign_bias {
        match parse_sign_bias(&sign_bias, reference_set) {
            Ok(sign_bias) => roles.update_from_sign_bias(&sign_bias),
            Err(e) => {
                eprintln!("{}: {}", "error".red(), e);
                process::exit(1);
            }
        }
    }

    let bsize = match parse_block_size(&args.block_size) {
        Ok(bsize) => bsize,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            process::exit(1);
        }
    };

    let symbols = match parse_symbols(args.symbol.as_deref(), reference_set) {
        Ok(symbols) => symbols,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            process::exit(1);
        }
    };

    println!(
        "reference set {}: fixed {} variable {}",
        reference_set.name(),
        roles.comp_fixed_ref.name(),
        roles
            .comp_var_refs()
            .iter()
            .map(|ref_frame| ref_frame.name())
            .collect::<Vec<&str>>()
            .join("/")
    );
    if !roles.compound_reference_allowed() {
        println!("{}", "compound prediction disabled by sign bias".yellow());
    }
    for symbol in symbols {
        dump_symbol(symbol, &roles, bsize);
    }
}
