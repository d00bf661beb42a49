use vypislib::registry::SourceTag;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: один файл выписки -> канонический CSV на stdout.
    let mut args = std::env::args().skip(1);
    let (Some(tag), Some(path)) = (args.next(), args.next()) else {
        eprintln!("usage: convert <tag> <statement.csv>");
        std::process::exit(2);
    };
    let tag = SourceTag::from_dir_name(&tag).ok_or("unknown tag")?;
    let records = tag.spec().parse(&std::fs::read(path)?, tag)?;

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
