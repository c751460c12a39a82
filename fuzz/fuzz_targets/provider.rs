#![no_main]

use libfuzzer_sys::fuzz_target;
use dotbrowse::{CilProvider, TreeBuilder};

fuzz_target!(|data: &[u8]| {
    if let Ok(types) = CilProvider.load_mem(data.to_vec()) {
        let _ = TreeBuilder::new(&types).build();
    }
});
