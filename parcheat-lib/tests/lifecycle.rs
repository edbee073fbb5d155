use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use parcheat_lib::{
    new_code_plugin, parse_codes, CodeEntry, CodePlugin, FnMemoryAccessor, MemoryAccessor,
    MemoryWriteRequest, ParVariant, RamImage,
};

fn recording_memory(
    writes: Rc<RefCell<Vec<(usize, usize, u64)>>>,
) -> FnMemoryAccessor<impl Fn(usize, usize) -> u64, impl FnMut(usize, usize, u64)> {
    FnMemoryAccessor::new(
        |_: usize, _: usize| 0,
        move |addr: usize, size: usize, value: u64| writes.borrow_mut().push((addr, size, value)),
    )
}

#[test]
fn host_drives_plugin_through_trait_object() {
    let writes = Rc::new(RefCell::new(Vec::new()));
    let mut memory = recording_memory(writes.clone());
    let mut plugin = new_code_plugin(ParVariant::SfcPar);
    assert_eq!(plugin.name(), "SFC PAR");

    plugin.execute(&mut memory);
    assert!(writes.borrow().is_empty());

    plugin.start("7E0030 05", false);
    plugin.execute(&mut memory);
    assert_eq!(*writes.borrow(), vec![(0x7e0030, 1, 0x05)]);

    plugin.stop();
    plugin.execute(&mut memory);
    assert_eq!(writes.borrow().len(), 1);
}

#[test]
fn generated_code_applies_the_requested_value() -> Result<()> {
    let mut plugin = new_code_plugin(ParVariant::SnesPar);
    let code = plugin.get_code_string(
        &[
            MemoryWriteRequest::new(0x7e0010, 2, 0x1234),
            MemoryWriteRequest::new(0x7e0018, 1, 0x99),
        ],
        false,
    )?;
    assert_eq!(
        parse_codes(&code),
        vec![
            CodeEntry::new(0x7e0010, 0x34),
            CodeEntry::new(0x7e0011, 0x12),
            CodeEntry::new(0x7e0018, 0x99),
        ]
    );
    assert_eq!(plugin.get_address(&code, false), 0x7e0010);

    let mut ram = RamImage::zeroed(0x7e0000, 0x20);
    plugin.start(&code, false);
    plugin.execute(&mut ram);
    assert_eq!(ram.read_u16(0x7e0010), 0x1234);
    assert_eq!(ram.read_u8(0x7e0018), 0x99);

    // the game overwrote the value, next cycle restores it
    ram.write_u16(0x7e0010, 0);
    plugin.execute(&mut ram);
    assert_eq!(ram.read_u16(0x7e0010), 0x1234);

    plugin.dispose();
    ram.write_u16(0x7e0010, 0);
    plugin.execute(&mut ram);
    assert_eq!(ram.read_u16(0x7e0010), 0);
    Ok(())
}
