use crate::config::LayoutConfig;
use crate::error::{PhoneSiftError, Result};
use crate::export::ListDocument;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const BODY_FONT: &str = "F1";
const TITLE_FONT: &str = "F2";

fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

/// Renders a laid-out list into PDF bytes.
pub fn render_pdf(document: &ListDocument, layout: &LayoutConfig) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            BODY_FONT => Object::Reference(body_font_id),
            TITLE_FONT => Object::Reference(title_font_id),
        },
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(mm(layout.page_width)),
        Object::Real(mm(layout.page_height)),
    ];

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(document.pages.len());
    for (index, page) in document.pages.iter().enumerate() {
        let mut operations = Vec::new();

        if index == 0 {
            heading_operations(&mut operations, &document.title, layout);
        }
        for line in &page.lines {
            text_operations(
                &mut operations,
                BODY_FONT,
                layout.body_font_size,
                line.x,
                line.y,
                &line.text,
                layout,
            );
        }

        let content = Content { operations };
        let encoded = content.encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_ids.len() as i64),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).map_err(|e| PhoneSiftError::Export {
        message: format!("Failed to encode PDF: {}", e),
    })?;

    Ok(buf)
}

fn heading_operations(operations: &mut Vec<Operation>, title: &str, layout: &LayoutConfig) {
    text_operations(
        operations,
        TITLE_FONT,
        layout.title_font_size,
        layout.title_x,
        layout.title_y,
        title,
        layout,
    );

    let rule_y = mm(layout.page_height - layout.rule_y);
    operations.push(Operation::new("w", vec![Object::Real(mm(layout.rule_width))]));
    operations.push(Operation::new(
        "m",
        vec![Object::Real(mm(layout.title_x)), Object::Real(rule_y)],
    ));
    operations.push(Operation::new(
        "l",
        vec![Object::Real(mm(layout.rule_x_end)), Object::Real(rule_y)],
    ));
    operations.push(Operation::new("S", vec![]));
}

fn text_operations(
    operations: &mut Vec<Operation>,
    font: &str,
    size: f32,
    x: f32,
    y: f32,
    text: &str,
    layout: &LayoutConfig,
) {
    // PDF user space grows upwards from the bottom edge.
    let baseline = mm(layout.page_height - y);

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
    ));
    operations.push(Operation::new(
        "Td",
        vec![Object::Real(mm(x)), Object::Real(baseline)],
    ));
    operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    operations.push(Operation::new("ET", vec![]));
}
