#![no_main]

use libfuzzer_sys::fuzz_target;
use tilecheck::tile::parse_grid;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Must never panic; any accepted grid must survive a text round trip.
    if let Ok(grid) = parse_grid(text) {
        assert_eq!(grid.len(), grid.width() * grid.height());
        let reparsed = parse_grid(&grid.to_text()).expect("saved grid must parse");
        assert_eq!(reparsed, grid);
    }
});
