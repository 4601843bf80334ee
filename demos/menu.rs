use altkey::{Accelerator, AcceleratorConfig, Alphabet};

const MENUS: &[&[&str]] = &[
    &["New", "Open...", "Save", "Save As...", "Print...", "Quit"],
    &["&Undo", "Redo", "Cut", "Copy", "Paste", "Select All", "Find && Replace"],
    &["Zoom In", "Zoom Out", "Actual Size", "Full Screen"],
];

fn main() -> altkey::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let alphabet = Alphabet::parse("0-9A-Z")?;
    let accelerator = Accelerator::new(AcceleratorConfig::with_alphabet(alphabet))?;

    for &menu in MENUS {
        let labels = accelerator.accelerated(menu);
        for (before, after) in menu.iter().zip(&labels) {
            println!("{before:<20} {after}");
        }
        println!(
            "accelerated {}/{}, quality {:.3}\n",
            accelerator.number_accelerated(&labels),
            labels.len(),
            accelerator.quality(&labels)
        );
    }
    Ok(())
}
