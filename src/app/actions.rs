use tracing::{info, warn};

use crate::client::{self, ClientError};
use crate::keymap::Action;
use crate::model::{ContainerOptions, InputError, PageName, PanelKind, VolumeType, image_reference};
use crate::pages::{ConfirmDialog, Form, FormKind, Page};
use crate::panel::Panel;
use crate::task::{Detail, Task, TaskOutput};

use super::App;

const DIALOG_SIZE: (u16, u16) = (60, 7);
const CREATE_FORM_WIDTH: u16 = 70;
const PULL_FORM_WIDTH: u16 = 60;

impl App {
    pub(super) fn perform(&mut self, action: Action) {
        let result = match action {
            Action::NextPanel => {
                self.panels.next();
                Ok(())
            }
            Action::PrevPanel => {
                self.panels.prev();
                Ok(())
            }
            Action::Quit => {
                self.stop();
                Ok(())
            }
            Action::Refresh(kind) => {
                self.start_task(Task::refresh_panel(kind));
                Ok(())
            }
            Action::Inspect(kind) => self.inspect(kind),
            Action::Remove(kind) => self.confirm_remove(kind),
            Action::CreateContainer => self.open_create_form(),
            Action::PullImage => {
                self.open_pull_form();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report_input_error(e);
        }
    }

    fn report_input_error(&mut self, e: InputError) {
        warn!(error = %e, "input error");
        self.set_error(e.to_string());
    }

    fn selected(&self, kind: PanelKind) -> Result<(String, String), InputError> {
        self.panels
            .get(kind)
            .and_then(|panel| panel.selected())
            .ok_or(InputError::NoSelection(kind))
    }

    fn open_create_form(&mut self) -> Result<(), InputError> {
        let (_, image) = self.selected(PanelKind::Images)?;
        let form = Form::new("create container", FormKind::CreateContainer, PanelKind::Images)
            .input("Name", "")
            .input("HostIP", "")
            .input("HostPort", "")
            .input("Port", "")
            .dropdown("VolumeType", &VolumeType::OPTIONS)
            .input("HostVolume", "")
            .input("Volume", "")
            .input("Image", &image)
            .input("User", "")
            .checkbox("Attach", false)
            .input("Env", "")
            .input("Cmd", "");
        let height = form.height();
        self.pages.show(PageName::Form, Page::Form(form), Some((CREATE_FORM_WIDTH, height)));
        Ok(())
    }

    fn open_pull_form(&mut self) {
        let form = Form::new("pull image", FormKind::PullImage, PanelKind::Images)
            .input("image", "")
            .submit_label("Pull");
        let height = form.height();
        self.pages.show(PageName::Form, Page::Form(form), Some((PULL_FORM_WIDTH, height)));
    }

    fn confirm_remove(&mut self, kind: PanelKind) -> Result<(), InputError> {
        let (key, label) = self.selected(kind)?;
        let description = format!("remove {} {}", kind.noun(), label);
        let task = Task::new(description.clone(), move |client, token| async move {
            token.run_until_cancelled(client::remove(client.as_ref(), kind, &key)).await??;
            Ok::<_, ClientError>(TaskOutput::Done)
        })
        .refreshing(kind);

        let runner = self.tasks.clone();
        let dialog = ConfirmDialog::new(
            format!("Do you want to remove the {}?", kind.noun()),
            "Done",
            kind,
            Box::new(move || runner.run(task)),
        );
        self.pending = Some(description);
        self.pages.show(PageName::Modal, Page::Dialog(dialog), Some(DIALOG_SIZE));
        Ok(())
    }

    fn inspect(&mut self, kind: PanelKind) -> Result<(), InputError> {
        let (key, label) = self.selected(kind)?;
        let title = format!("{} {}", kind.noun(), label);
        self.start_task(Task::new(format!("inspect {}", title), move |client, token| async move {
            let text = token.run_until_cancelled(client::inspect(client.as_ref(), kind, &key)).await??;
            Ok::<_, ClientError>(TaskOutput::Detail(Detail { title, text, return_to: kind }))
        }));
        Ok(())
    }

    /// Validate the open form and start its task. Input errors keep the form
    /// open so the user can fix them.
    pub(super) fn submit_form(&mut self) {
        let Some(Page::Form(form)) = self.pages.active_page_mut() else {
            return;
        };
        let kind = form.kind;
        let values = form.values();

        let task = match kind {
            FormKind::CreateContainer => match ContainerOptions::from_form(&values) {
                Ok(options) => create_container_task(options),
                Err(e) => return self.report_input_error(e),
            },
            FormKind::PullImage => match image_reference(&values) {
                Ok(reference) => pull_image_task(reference),
                Err(e) => return self.report_input_error(e),
            },
        };

        info!(task = %task.description, "form submitted");
        self.pages.dismiss(PageName::Form, PanelKind::Images, &mut self.panels);
        self.start_task(task);
    }
}

fn create_container_task(options: ContainerOptions) -> Task {
    Task::new(format!("create container {}", options.image), move |client, token| async move {
        token.run_until_cancelled(client.create_container(options)).await??;
        Ok::<_, ClientError>(TaskOutput::Done)
    })
    .refreshing(PanelKind::Containers)
}

fn pull_image_task(reference: String) -> Task {
    Task::new(format!("pull image {}", reference), move |client, token| async move {
        token.run_until_cancelled(client.pull_image(&reference)).await??;
        Ok::<_, ClientError>(TaskOutput::Done)
    })
    .refreshing(PanelKind::Images)
}
