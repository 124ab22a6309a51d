use crate::config::{ConfigOverrides, OutputTarget, SymbolSource};

use super::commands::ExportArgs;

impl From<&ExportArgs> for ConfigOverrides {
    fn from(args: &ExportArgs) -> Self {
        let symbols = if args.discover {
            Some(SymbolSource::Discover)
        } else if args.symbols.is_empty() {
            None
        } else {
            Some(SymbolSource::List {
                tickers: args.symbols.clone(),
            })
        };

        let output = match (&args.output_dir, &args.output_file) {
            (Some(dir), _) => Some(OutputTarget::PerSymbol { dir: dir.clone() }),
            (None, Some(path)) => Some(OutputTarget::Cumulative { path: path.clone() }),
            (None, None) => None,
        };

        ConfigOverrides {
            symbols,
            start: args.start,
            end: args.end,
            output,
        }
    }
}
