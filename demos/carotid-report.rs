use pdf_tables::{
    colours, CellAlign, CellOptions, FontFamily, Info, Pt, Report, RowOptions, TableAlign,
    TableOptions,
};

fn main() {
    let fonts = FontFamily::load(
        include_bytes!("../assets/DejaVuSans.ttf").to_vec(),
        include_bytes!("../assets/DejaVuSans-Bold.ttf").to_vec(),
    )
    .expect("can load fonts");

    let mut report = Report::new();
    let mut info = Info::new();
    info.title("Carotid Doppler").author("Vascular Lab");
    report.set_info(info);

    let table = report.add_table(TableOptions {
        align: TableAlign::Justify,
        ..Default::default()
    });
    table.add_spacer_row();
    table.add_row(RowOptions::default()).add_col(
        "Evaluation",
        CellOptions::default()
            .bold()
            .colspan(7)
            .align(CellAlign::Center),
    );
    table
        .add_row(RowOptions { underline: true })
        .add_col(
            "Right Carotid",
            CellOptions::default()
                .bold()
                .colspan(3)
                .align(CellAlign::Center),
        )
        .add_col(" ", CellOptions::default().border_right(colours::GREY))
        .add_col(
            "Left Carotid",
            CellOptions::default()
                .bold()
                .colspan(3)
                .align(CellAlign::Center),
        );
    for (vessel, right, left) in [("CCA", 82, 77), ("ICA", 112, 98), ("ECA", 64, 70)] {
        table
            .add_row(RowOptions::default())
            .add_col(vessel, CellOptions::default().indent_left(Pt(6.0)))
            .add_col(right.to_string(), CellOptions::default().align(CellAlign::Right))
            .add_col("cm/s", CellOptions::default().size(Pt(8.0)))
            .add_col(" ", CellOptions::default())
            .add_col(vessel, CellOptions::default().indent_left(Pt(6.0)))
            .add_col(left.to_string(), CellOptions::default().align(CellAlign::Right))
            .add_col("cm/s", CellOptions::default().size(Pt(8.0)));
    }

    report.add_page();
    report
        .add_table(TableOptions {
            no_wrap: true,
            ..Default::default()
        })
        .add_row(RowOptions::default())
        .add_col("Impression", CellOptions::default().bold())
        .add_col(
            lipsum::lipsum(80),
            CellOptions::default().color(colours::BLUE),
        );

    let summary = report
        .build(fonts, "carotid-report.pdf")
        .expect("can write pdf");
    println!("wrote {} pages to carotid-report.pdf", summary.pages);
}
