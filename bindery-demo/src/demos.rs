//! The demo catalog.

use bindery_binder::{
    BindError, Binder, FieldSpec, MediaSource, Metadata, ServiceDescriptor, handler_fn,
};

/// A named, bindable demo interface.
#[derive(Debug, Clone, Copy)]
pub struct Demo {
    /// Name used on the command line.
    pub name: &'static str,
    /// One-line summary.
    pub summary: &'static str,
    build: fn(&Binder) -> Result<ServiceDescriptor, BindError>,
}

impl Demo {
    /// Bind this demo against `binder`'s registry.
    pub fn bind(&self, binder: &Binder) -> Result<ServiceDescriptor, BindError> {
        (self.build)(binder)
    }
}

/// Every demo, in listing order.
pub static CATALOG: &[Demo] = &[
    Demo {
        name: "greet",
        summary: "Greet a name; text in, text out",
        build: greet,
    },
    Demo {
        name: "greet_with_age",
        summary: "Greet a name with an age; text and number in",
        build: greet_with_age,
    },
    Demo {
        name: "analyze_text",
        summary: "Count words and characters; two text outputs",
        build: analyze_text,
    },
    Demo {
        name: "echo_text",
        summary: "Echo labelled text back",
        build: echo_text,
    },
    Demo {
        name: "double_number",
        summary: "Double a number",
        build: double_number,
    },
    Demo {
        name: "add_ten",
        summary: "Add ten to a slider value in [0, 100]",
        build: add_ten,
    },
    Demo {
        name: "check_status",
        summary: "Report whether a checkbox is checked",
        build: check_status,
    },
    Demo {
        name: "show_choice",
        summary: "Report the dropdown option selected",
        build: show_choice,
    },
    Demo {
        name: "process_image",
        summary: "Return the uploaded image unchanged",
        build: process_image,
    },
    Demo {
        name: "greet_custom",
        summary: "Greet a name from a customized two-line text box",
        build: greet_custom,
    },
];

/// Look a demo up by name.
pub fn find(name: &str) -> Option<&'static Demo> {
    CATALOG.iter().find(|demo| demo.name == name)
}

fn greet(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
    binder.bind(handler, "text", "text", None)
}

fn greet_with_age(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(name, age): (String, f64)| {
        format!("Hello, {name}! You are {age} years old.")
    });
    binder.bind(handler, ["text", "number"], "text", None)
}

fn analyze_text(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(text,): (String,)| {
        (
            format!("Word Count: {}", text.split_whitespace().count()),
            format!("Character Count: {}", text.chars().count()),
        )
    });
    binder.bind(handler, "text", ["text", "text"], None)
}

fn echo_text(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(text,): (String,)| text);
    binder.bind(
        handler,
        FieldSpec::text().with_label("Enter some text"),
        FieldSpec::text().with_label("Echoed text"),
        Metadata::titled("Textbox Example"),
    )
}

fn double_number(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(number,): (f64,)| number * 2.0);
    binder.bind(
        handler,
        FieldSpec::number().with_label("Enter a number"),
        FieldSpec::number().with_label("Doubled number"),
        Metadata::titled("Number Example"),
    )
}

fn add_ten(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(value,): (f64,)| value + 10.0);
    binder.bind(
        handler,
        FieldSpec::slider(0.0, 100.0)?.with_label("Select a value"),
        FieldSpec::number().with_label("Value + 10"),
        Metadata::titled("Slider Example"),
    )
}

fn check_status(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(is_checked,): (bool,)| {
        let status = if is_checked { "checked" } else { "unchecked" };
        format!("Checkbox is {status}")
    });
    binder.bind(
        handler,
        FieldSpec::checkbox().with_label("Check this box"),
        FieldSpec::text().with_label("Status"),
        Metadata::titled("Checkbox Example"),
    )
}

fn show_choice(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(choice,): (String,)| format!("You selected: {choice}"));
    binder.bind(
        handler,
        FieldSpec::dropdown(["Option A", "Option B", "Option C"])?.with_label("Choose an option"),
        FieldSpec::text().with_label("Your choice"),
        Metadata::titled("Dropdown Example"),
    )
}

fn process_image(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(image,): (MediaSource,)| image);
    binder.bind(
        handler,
        FieldSpec::image().with_label("Upload an image"),
        FieldSpec::image().with_label("Processed image"),
        Metadata::titled("Image Example"),
    )
}

fn greet_custom(binder: &Binder) -> Result<ServiceDescriptor, BindError> {
    let handler = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
    binder.bind(
        handler,
        FieldSpec::text()
            .with_label("Enter Your Name")
            .with_placeholder("Type here...")
            .with_lines(2),
        FieldSpec::text().with_label("Greeting Output"),
        Metadata::titled("Customized Greeting App"),
    )
}
